//! The backend seam

use async_trait::async_trait;
use encoder::NamedCircuitInput;
use thiserror::Error;

/// Opaque failure surfaced by a proving backend.
///
/// The harness never inspects these beyond reporting them; a failed trial
/// aborts the run for that backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The circuit input could not be parsed into signal values.
    #[error("invalid circuit input: {0}")]
    Input(String),

    /// The input could not be encoded into the backend's wire shape.
    #[error(transparent)]
    Encode(#[from] encoder::EncodeError),

    /// The proving key failed to deserialize.
    #[error("failed to load proving key: {0}")]
    Key(String),

    /// Witness generation failed inside the circuit runtime.
    #[error("witness generation failed: {0}")]
    Witness(String),

    /// The Groth16 prover itself failed.
    #[error("proof generation failed: {0}")]
    Proving(String),

    /// A proof or key could not be serialized.
    #[error("proof serialization failed: {0}")]
    Serialize(String),

    /// Proof verification could not be carried out.
    #[error("verification failed: {0}")]
    Verify(String),
}

/// A generated proof plus the public inputs it binds.
///
/// Proof points are compressed arkworks encodings; public inputs are
/// little-endian 32-byte field elements, concatenated.
#[derive(Clone, Debug)]
pub struct ProofArtifact {
    /// Proof point A (G1).
    pub a: Vec<u8>,
    /// Proof point B (G2).
    pub b: Vec<u8>,
    /// Proof point C (G1).
    pub c: Vec<u8>,
    /// Public inputs as concatenated little-endian field bytes.
    pub public_inputs: Vec<u8>,
}

impl ProofArtifact {
    /// The full proof as concatenated bytes `A || B || C`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let capacity = self
            .a
            .len()
            .saturating_add(self.b.len())
            .saturating_add(self.c.len());
        let mut bytes = Vec::with_capacity(capacity);
        bytes.extend_from_slice(&self.a);
        bytes.extend_from_slice(&self.b);
        bytes.extend_from_slice(&self.c);
        bytes
    }
}

/// A proving pipeline under benchmark.
///
/// Implementations may parallelize internally; the harness only measures
/// the external latency of `prove` and never runs two calls concurrently.
#[async_trait]
pub trait ProvingBackend: Send + Sync {
    /// Human-readable backend name, used as the result-table title.
    fn name(&self) -> &str;

    /// Generate a proof for one encoded circuit input.
    async fn prove(&self, input: &NamedCircuitInput) -> Result<ProofArtifact, BackendError>;

    /// Check a previously generated proof against its public inputs.
    fn verify(&self, artifact: &ProofArtifact) -> Result<bool, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_bytes_concatenate_in_point_order() {
        let artifact = ProofArtifact {
            a: vec![1, 2],
            b: vec![3],
            c: vec![4, 5],
            public_inputs: Vec::new(),
        };
        assert_eq!(artifact.to_bytes(), vec![1, 2, 3, 4, 5]);
    }
}
