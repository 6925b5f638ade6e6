//! Proving backends
//!
//! The benchmark drives two Groth16 proving pipelines over the same circuit
//! artifacts:
//!
//! - [`Groth16Prover`] initializes once (witness generator, proving key)
//!   and serves repeated proof requests, taking its input as a serialized
//!   pairs-form JSON string;
//! - [`FullProver`] runs the whole pipeline per call (artifact load, key
//!   deserialization, witness generation, proving), taking its input as an
//!   object-form JSON mapping.
//!
//! Both sit behind the [`ProvingBackend`] seam, so the timing harness sees
//! an opaque async operation either way. Circuit artifacts come from an
//! [`ArtifactStore`] resolving names against a base URL or a local
//! directory; retrieval happens once, before any timed trial.

pub mod backend;
pub mod fixtures;
pub mod groth16;
mod inputs;
pub mod oneshot;
mod serialization;

pub use backend::{BackendError, ProofArtifact, ProvingBackend};
pub use fixtures::{ArtifactStore, FetchError};
pub use groth16::{Groth16Prover, generate_proving_key};
pub use oneshot::FullProver;
