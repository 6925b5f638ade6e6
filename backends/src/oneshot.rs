//! One-shot full-prove backend
//!
//! Mirrors the cost profile of a `fullProve`-style library call: every
//! request reloads the circuit artifacts, deserializes the proving key,
//! computes the witness, and proves, with nothing amortized across calls.

use std::path::{Path, PathBuf};

use ark_bn254::Bn254;
use ark_circom::CircomReduction;
use ark_groth16::{Groth16, ProvingKey};
use ark_serialize::CanonicalDeserialize;
use ark_snark::SNARK;
use async_trait::async_trait;
use encoder::NamedCircuitInput;
use serde_json::Value;

use crate::backend::{BackendError, ProofArtifact, ProvingBackend};
use crate::groth16::{load_config, prove_with_config, verify_artifact};
use crate::inputs::signal_map_from_object;

/// Run the full proving pipeline once, from artifacts to proof.
///
/// This is the per-call entry point: the witness generator and proving key
/// are parsed fresh on every invocation, which is exactly the work a
/// one-shot proving library performs.
pub fn full_prove(
    input: &Value,
    circuit_wasm: &Path,
    r1cs: &Path,
    proving_key: &[u8],
) -> Result<ProofArtifact, BackendError> {
    let signals = signal_map_from_object(input)?;
    let cfg = load_config(circuit_wasm, r1cs)?;
    let pk = ProvingKey::<Bn254>::deserialize_compressed_unchecked(proving_key)
        .map_err(|e| BackendError::Key(e.to_string()))?;
    prove_with_config(cfg, &signals, &pk)
}

/// The one-shot prover: holds artifact locations, amortizes nothing.
pub struct FullProver {
    circuit_wasm: PathBuf,
    r1cs: PathBuf,
    proving_key: Vec<u8>,
}

impl FullProver {
    /// Record the artifact locations and key bytes for per-call use.
    pub fn new(circuit_wasm: PathBuf, r1cs: PathBuf, proving_key: Vec<u8>) -> Self {
        Self {
            circuit_wasm,
            r1cs,
            proving_key,
        }
    }
}

#[async_trait]
impl ProvingBackend for FullProver {
    fn name(&self) -> &str {
        "ark-groth16 (one-shot)"
    }

    async fn prove(&self, input: &NamedCircuitInput) -> Result<ProofArtifact, BackendError> {
        full_prove(
            &input.to_object_value(),
            &self.circuit_wasm,
            &self.r1cs,
            &self.proving_key,
        )
    }

    fn verify(&self, artifact: &ProofArtifact) -> Result<bool, BackendError> {
        let pk = ProvingKey::<Bn254>::deserialize_compressed_unchecked(
            self.proving_key.as_slice(),
        )
        .map_err(|e| BackendError::Key(e.to_string()))?;
        let pvk = Groth16::<Bn254, CircomReduction>::process_vk(&pk.vk)
            .map_err(|e| BackendError::Key(e.to_string()))?;
        verify_artifact(&pvk, artifact)
    }
}
