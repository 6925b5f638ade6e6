//! Timing harness
//!
//! Measures the wall-clock latency of caller-supplied proving operations
//! and accumulates per-trial samples plus their arithmetic mean. Trials run
//! strictly sequentially: each operation is awaited to completion before
//! the next begins, so per-call latency is never skewed by contention
//! between trials. The operation under test is an opaque future; whatever
//! parallelism it uses internally is its own business.
//!
//! There is no cancellation and no timeout. A hung operation blocks the
//! benchmark, which is acceptable for a manually observed diagnostic tool.

use std::time::{Duration, Instant};

use thiserror::Error;

pub mod report;

pub use report::TimingTable;

/// Label of the synthetic mean entry appended by [`run_trials`].
pub const AVERAGE_LABEL: &str = "Average";

/// One measured trial: a display label and its duration in fractional
/// milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct TimingSample {
    /// Row label, `"Test #1"`..`"Test #N"` or [`AVERAGE_LABEL`].
    pub label: String,
    /// Elapsed wall-clock time in milliseconds.
    pub duration_ms: f64,
}

/// Failure surfaced by the harness.
#[derive(Debug, Error)]
pub enum HarnessError<E> {
    /// The requested trial count was zero.
    #[error("trial count must be at least 1")]
    InvalidArgument,

    /// A trial's operation failed; the run is aborted and no samples are
    /// reported, since a partial average would be misleading.
    #[error("trial {index} failed: {source}")]
    Trial {
        /// 1-based index of the failed trial.
        index: u32,
        /// The operation's own failure.
        source: E,
    },
}

/// Await `operation` and return its result with the elapsed wall-clock time
/// in fractional milliseconds.
///
/// If the operation fails, the failure propagates unmeasured; no partial
/// timing is recorded.
pub async fn measure<T, E>(
    operation: impl Future<Output = Result<T, E>>,
) -> Result<(T, f64), E> {
    let start = Instant::now();
    let result = operation.await?;
    Ok((result, duration_ms(start.elapsed())))
}

/// Run `count` sequential trials and return their samples plus a final
/// `"Average"` entry holding the arithmetic mean.
///
/// `next_operation` is invoked once per trial, outside the measured
/// interval, so input construction does not pollute the sample; only the
/// returned future is timed. Trials are labeled `"Test #1"`..`"Test #N"`.
/// `count` must be at least 1.
pub async fn run_trials<F, Fut, T, E>(
    mut next_operation: F,
    count: u32,
) -> Result<Vec<TimingSample>, HarnessError<E>>
where
    F: FnMut() -> Result<Fut, E>,
    Fut: Future<Output = Result<T, E>>,
{
    if count == 0 {
        return Err(HarnessError::InvalidArgument);
    }

    let mut samples = Vec::new();
    let mut total_ms = 0.0f64;

    for index in 1..=count {
        let operation =
            next_operation().map_err(|source| HarnessError::Trial { index, source })?;
        let (_result, elapsed_ms) = measure(operation)
            .await
            .map_err(|source| HarnessError::Trial { index, source })?;

        log::debug!("trial {index}/{count}: {elapsed_ms:.2} ms");
        samples.push(TimingSample {
            label: format!("Test #{index}"),
            duration_ms: elapsed_ms,
        });
        total_ms += elapsed_ms;
    }

    samples.push(TimingSample {
        label: AVERAGE_LABEL.to_string(),
        duration_ms: total_ms / f64::from(count),
    });
    Ok(samples)
}

fn duration_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}
