//! Tabular result sink
//!
//! Benchmark results render as an append-only two-column table of
//! `(label, formatted duration)` rows, durations fixed to two decimal
//! places.

use std::io::{self, Write};

use crate::TimingSample;

/// An append-only result table for one backend's run.
#[derive(Clone, Debug)]
pub struct TimingTable {
    title: String,
    rows: Vec<(String, String)>,
}

impl TimingTable {
    /// Create an empty table with a title line.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    /// Build a table from measured samples, one row per sample.
    pub fn from_samples(title: impl Into<String>, samples: &[TimingSample]) -> Self {
        let mut table = Self::new(title);
        for sample in samples {
            table.push(&sample.label, sample.duration_ms);
        }
        table
    }

    /// Append one row, formatting the duration to two decimal places.
    pub fn push(&mut self, label: &str, duration_ms: f64) {
        self.rows
            .push((label.to_string(), format!("{duration_ms:.2}")));
    }

    /// The accumulated `(label, formatted duration)` rows.
    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    /// Render the table with aligned columns.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let label_width = self
            .rows
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);

        writeln!(out, "{}", self.title)?;
        for (label, duration) in &self.rows {
            writeln!(out, "  {label:<label_width$}  {duration:>10} ms")?;
        }
        Ok(())
    }
}
