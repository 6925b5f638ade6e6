//! Persistent ark-groth16 backend
//!
//! Loads the circuit witness generator and proving key once, then serves
//! repeated proof requests. The public entry point takes the serialized
//! pairs-form input string, which is the wire shape this backend consumes;
//! the [`ProvingBackend`] impl serializes an encoded input into that shape
//! and delegates.

use std::path::Path;

use ark_bn254::{Bn254, Fr};
use ark_circom::{CircomBuilder, CircomConfig, CircomReduction};
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, ProvingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::SNARK;
use ark_std::rand::rngs::OsRng;
use ark_std::rand::thread_rng;
use async_trait::async_trait;
use encoder::NamedCircuitInput;
use num_bigint::BigInt;

use crate::backend::{BackendError, ProofArtifact, ProvingBackend};
use crate::inputs::signal_map_from_pairs;
use crate::serialization::{bytes_to_frs, frs_to_bytes};

/// The persistent prover: initialized once, reused across trials.
pub struct Groth16Prover {
    cfg: CircomConfig<Fr>,
    pk: ProvingKey<Bn254>,
    pvk: PreparedVerifyingKey<Bn254>,
}

impl Groth16Prover {
    /// Load the witness generator, constraint system, and proving key.
    ///
    /// The proving key is trusted fixture material, so deserialization
    /// skips curve-point validation for faster startup.
    pub fn load(
        circuit_wasm: &Path,
        r1cs: &Path,
        proving_key: &[u8],
    ) -> Result<Self, BackendError> {
        let cfg = load_config(circuit_wasm, r1cs)?;
        let pk = ProvingKey::<Bn254>::deserialize_compressed_unchecked(proving_key)
            .map_err(|e| BackendError::Key(e.to_string()))?;
        let pvk = Groth16::<Bn254, CircomReduction>::process_vk(&pk.vk)
            .map_err(|e| BackendError::Key(e.to_string()))?;

        log::debug!(
            "persistent prover ready: {} constraints",
            cfg.r1cs.constraints.len()
        );
        Ok(Self { cfg, pk, pvk })
    }

    /// Generate a proof from a serialized pairs-form input.
    pub fn prove_serialized(&self, serialized_input: &str) -> Result<ProofArtifact, BackendError> {
        let signals = signal_map_from_pairs(serialized_input)?;
        prove_with_config(self.cfg.clone(), &signals, &self.pk)
    }
}

#[async_trait]
impl ProvingBackend for Groth16Prover {
    fn name(&self) -> &str {
        "ark-groth16 (persistent)"
    }

    async fn prove(&self, input: &NamedCircuitInput) -> Result<ProofArtifact, BackendError> {
        self.prove_serialized(&input.to_pairs_json()?)
    }

    fn verify(&self, artifact: &ProofArtifact) -> Result<bool, BackendError> {
        verify_artifact(&self.pvk, artifact)
    }
}

/// Load circuit artifacts into an ark-circom configuration.
pub(crate) fn load_config(circuit_wasm: &Path, r1cs: &Path) -> Result<CircomConfig<Fr>, BackendError> {
    CircomConfig::<Fr>::new(circuit_wasm, r1cs)
        .map_err(|e| BackendError::Witness(format!("failed to load circuit artifacts: {e}")))
}

/// Compute the witness for `signals` and produce a Groth16 proof.
pub(crate) fn prove_with_config(
    cfg: CircomConfig<Fr>,
    signals: &[(String, Vec<BigInt>)],
    pk: &ProvingKey<Bn254>,
) -> Result<ProofArtifact, BackendError> {
    let mut builder = CircomBuilder::new(cfg);
    for (name, values) in signals {
        for value in values {
            builder.push_input(name, value.clone());
        }
    }

    let circuit = builder
        .build()
        .map_err(|e| BackendError::Witness(e.to_string()))?;
    let public_inputs = circuit
        .get_public_inputs()
        .ok_or_else(|| BackendError::Witness("witness has no public inputs".to_string()))?;

    let mut rng = OsRng;
    let proof = Groth16::<Bn254, CircomReduction>::prove(pk, circuit, &mut rng)
        .map_err(|e| BackendError::Proving(e.to_string()))?;

    let mut a = Vec::new();
    proof
        .a
        .serialize_compressed(&mut a)
        .map_err(|e| BackendError::Serialize(format!("point A: {e}")))?;
    let mut b = Vec::new();
    proof
        .b
        .serialize_compressed(&mut b)
        .map_err(|e| BackendError::Serialize(format!("point B: {e}")))?;
    let mut c = Vec::new();
    proof
        .c
        .serialize_compressed(&mut c)
        .map_err(|e| BackendError::Serialize(format!("point C: {e}")))?;

    Ok(ProofArtifact {
        a,
        b,
        c,
        public_inputs: frs_to_bytes(&public_inputs),
    })
}

/// Verify an artifact against a processed verifying key.
pub(crate) fn verify_artifact(
    pvk: &PreparedVerifyingKey<Bn254>,
    artifact: &ProofArtifact,
) -> Result<bool, BackendError> {
    let proof_bytes = artifact.to_bytes();
    let proof = Proof::<Bn254>::deserialize_compressed(proof_bytes.as_slice())
        .map_err(|e| BackendError::Verify(format!("failed to load proof: {e}")))?;

    let public_inputs = bytes_to_frs(&artifact.public_inputs)?;
    let expected = pvk
        .vk
        .gamma_abc_g1
        .len()
        .checked_sub(1)
        .ok_or_else(|| BackendError::Verify("invalid verifying key".to_string()))?;
    if public_inputs.len() != expected {
        return Err(BackendError::Verify(format!(
            "public input count mismatch: got {}, expected {expected}",
            public_inputs.len()
        )));
    }

    Groth16::<Bn254, CircomReduction>::verify_with_processed_vk(pvk, &public_inputs, &proof)
        .map_err(|e| BackendError::Verify(e.to_string()))
}

/// Derive a proving key with a circuit-specific setup.
///
/// Fallback for circuits whose fixture set carries no key. The output uses
/// the same compressed encoding a fixture key does.
pub fn generate_proving_key(circuit_wasm: &Path, r1cs: &Path) -> Result<Vec<u8>, BackendError> {
    let cfg = load_config(circuit_wasm, r1cs)?;
    let mut builder = CircomBuilder::new(cfg);
    let empty = builder.setup();

    let mut rng = thread_rng();
    let (pk, _vk) = Groth16::<Bn254, CircomReduction>::circuit_specific_setup(empty, &mut rng)
        .map_err(|e| BackendError::Proving(format!("circuit setup failed: {e}")))?;

    let mut bytes = Vec::new();
    pk.serialize_compressed(&mut bytes)
        .map_err(|e| BackendError::Serialize(format!("proving key: {e}")))?;
    log::info!("generated circuit-specific proving key ({} bytes)", bytes.len());
    Ok(bytes)
}
