//! Benchmark pipeline tests over a stub backend

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use backends::{BackendError, ProofArtifact, ProvingBackend};
use encoder::{
    EncodedSignal, NamedCircuitInput, NumericInput, RawSignal, SignalEncoding, bits_to_bytes,
    build_named_input, from_limb_array, signals_from_json,
};
use harness::{AVERAGE_LABEL, HarnessError, TimingTable, run_trials};

/// A backend that records call counts and can fail at a chosen trial.
struct StubBackend {
    fail_at: Option<u32>,
    calls: AtomicU32,
}

impl StubBackend {
    fn new() -> Self {
        Self {
            fail_at: None,
            calls: AtomicU32::new(0),
        }
    }

    fn failing_at(call: u32) -> Self {
        Self {
            fail_at: Some(call),
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProvingBackend for StubBackend {
    fn name(&self) -> &str {
        "stub"
    }

    async fn prove(&self, input: &NamedCircuitInput) -> Result<ProofArtifact, BackendError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        if self.fail_at == Some(call) {
            return Err(BackendError::Proving(format!("stub failure on call {call}")));
        }
        // Echo the serialized input length so the artifact depends on it.
        let serialized = input.to_object_json()?;
        Ok(ProofArtifact {
            a: vec![1],
            b: vec![2],
            c: vec![3],
            public_inputs: serialized.into_bytes(),
        })
    }

    fn verify(&self, _artifact: &ProofArtifact) -> Result<bool, BackendError> {
        Ok(true)
    }
}

fn keccak_style_input() -> anyhow::Result<NamedCircuitInput> {
    let value = NumericInput::random(32)?;
    let fields = vec![(
        "in".to_string(),
        RawSignal::Bytes(value.as_bytes().to_vec()),
    )];
    Ok(build_named_input(
        &fields,
        SignalEncoding::Limb { limb_count: 8 },
    )?)
}

#[tokio::test]
async fn five_trials_produce_six_rows_and_a_correct_mean() -> anyhow::Result<()> {
    let backend = StubBackend::new();
    let input = keccak_style_input()?;

    let samples = run_trials(
        || {
            let input = input.clone();
            let backend = &backend;
            Ok::<_, BackendError>(async move { backend.prove(&input).await })
        },
        5,
    )
    .await
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    assert_eq!(backend.calls(), 5);
    assert_eq!(samples.len(), 6);
    assert_eq!(samples[5].label, AVERAGE_LABEL);

    let mean: f64 = samples
        .iter()
        .take(5)
        .map(|sample| sample.duration_ms)
        .sum::<f64>()
        / 5.0;
    assert!((samples[5].duration_ms - mean).abs() < 1e-9);

    let table = TimingTable::from_samples("keccak256 / stub", &samples);
    assert_eq!(table.rows().len(), 6);
    assert_eq!(table.rows()[0].0, "Test #1");
    assert_eq!(table.rows()[5].0, AVERAGE_LABEL);
    Ok(())
}

#[tokio::test]
async fn a_backend_failure_aborts_the_run_with_no_samples() -> anyhow::Result<()> {
    let backend = StubBackend::failing_at(3);
    let input = keccak_style_input()?;

    let result = run_trials(
        || {
            let input = input.clone();
            let backend = &backend;
            Ok::<_, BackendError>(async move { backend.prove(&input).await })
        },
        5,
    )
    .await;

    match result {
        Err(HarnessError::Trial { index, source }) => {
            assert_eq!(index, 3);
            assert!(matches!(source, BackendError::Proving(_)));
        }
        Ok(samples) => panic!("expected a trial failure, got {} samples", samples.len()),
        Err(other) => panic!("unexpected harness error: {other}"),
    }
    // The failed trial still consumed a call; nothing ran after it.
    assert_eq!(backend.calls(), 3);
    Ok(())
}

#[tokio::test]
async fn both_wire_shapes_reach_the_backend_from_one_source() -> anyhow::Result<()> {
    // One canonical 2^32 source value, viewed both ways.
    let value = NumericInput::from_bytes_be(vec![0x01, 0x00, 0x00, 0x00, 0x00]);

    let limb_fields = vec![(
        "in".to_string(),
        RawSignal::Bytes(value.as_bytes().to_vec()),
    )];
    let persistent = build_named_input(&limb_fields, SignalEncoding::Limb { limb_count: 8 })?;
    assert_eq!(
        persistent.to_pairs_json()?,
        r#"[["in",[[0,1,0,0,0,0,0,0]]]]"#
    );

    let one_shot = build_named_input(&limb_fields, SignalEncoding::Bit)?;
    match &one_shot.entries()[0].1 {
        EncodedSignal::Bits(bits) => {
            assert_eq!(bits.len(), 40);
            assert_eq!(bits_to_bytes(bits)?, value.as_bytes());
        }
        other => panic!("expected bits, got {other:?}"),
    }

    // Limb view recomposes to the same integer the byte view encodes.
    match &persistent.entries()[0].1 {
        EncodedSignal::Limbs(limbs) => assert_eq!(from_limb_array(limbs), value.value()),
        other => panic!("expected limbs, got {other:?}"),
    }

    let backend = StubBackend::new();
    let artifact = backend.prove(&one_shot).await?;
    assert!(backend.verify(&artifact)?);
    Ok(())
}

#[tokio::test]
async fn fixture_passthrough_survives_the_seam_unencoded() -> anyhow::Result<()> {
    let fixture = serde_json::json!({
        "identityNullifier": "496049570108222276141885766558446554673",
        "treePathIndices": ["0", "1", "0"],
    });
    let fields = signals_from_json(&fixture)?;
    let input = NamedCircuitInput::passthrough(&fields)?;
    assert_eq!(input.to_object_value(), fixture);

    let backend = StubBackend::new();
    let artifact = backend.prove(&input).await?;
    let echoed: serde_json::Value = serde_json::from_slice(&artifact.public_inputs)?;
    assert_eq!(echoed, fixture);
    Ok(())
}
