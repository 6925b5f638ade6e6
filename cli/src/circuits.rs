//! Benchmark circuit plans
//!
//! Each benchmarked circuit is a thin, data-only configuration: artifact
//! names, how the input is sourced, and how each backend's copy of that
//! input is encoded. All the shared logic lives in the `encoder`,
//! `harness`, and `backends` crates.

use encoder::{
    EncodeError, NamedCircuitInput, NumericInput, RawSignal, SignalEncoding, build_named_input,
    signals_from_json,
};
use serde_json::Value;

/// Where a circuit's input comes from.
#[derive(Clone, Copy, Debug)]
pub enum PlanInput {
    /// A fresh cryptographically random value per trial, fed to one named
    /// signal.
    Random {
        /// Number of random bytes to draw.
        byte_length: usize,
        /// The circuit signal the value feeds.
        signal: &'static str,
    },
    /// A canned JSON fixture, identical across trials.
    Fixture {
        /// Artifact name of the fixture file.
        artifact: &'static str,
    },
}

/// How the one-shot backend's copy of the input is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OneShotInput {
    /// MSB-first bit expansion of the random input bytes.
    Bits,
    /// The fixture's decimal strings, forwarded unencoded.
    Passthrough,
}

/// One benchmark circuit as pure configuration.
#[derive(Clone, Copy, Debug)]
pub struct CircuitPlan {
    /// Circuit name, also the CLI identifier.
    pub name: &'static str,
    /// Artifact name of the compiled witness-generator WASM.
    pub circuit_wasm: &'static str,
    /// Artifact name of the R1CS constraint file.
    pub r1cs: &'static str,
    /// Artifact name of the serialized proving key.
    pub proving_key: &'static str,
    /// Input source for both backends.
    pub input: PlanInput,
    /// Limb width used for the persistent backend's encoding.
    pub limb_count: usize,
    /// Input encoding used for the one-shot backend.
    pub one_shot_encoding: OneShotInput,
}

/// The built-in benchmark circuits.
pub const PLANS: [CircuitPlan; 4] = [
    CircuitPlan {
        name: "keccak256",
        circuit_wasm: "keccak256_256_test.wasm",
        r1cs: "keccak256_256_test.r1cs",
        proving_key: "keccak256_256_test.pk",
        input: PlanInput::Random {
            byte_length: 32,
            signal: "in",
        },
        limb_count: 8,
        one_shot_encoding: OneShotInput::Bits,
    },
    CircuitPlan {
        name: "sha256",
        circuit_wasm: "sha256_512.wasm",
        r1cs: "sha256_512.r1cs",
        proving_key: "sha256_512.pk",
        input: PlanInput::Random {
            byte_length: 64,
            signal: "in",
        },
        limb_count: 16,
        one_shot_encoding: OneShotInput::Bits,
    },
    CircuitPlan {
        name: "rsa",
        circuit_wasm: "rsa_main.wasm",
        r1cs: "rsa_main.r1cs",
        proving_key: "rsa_main.pk",
        input: PlanInput::Fixture {
            artifact: "rsa_input.json",
        },
        limb_count: 64,
        one_shot_encoding: OneShotInput::Passthrough,
    },
    CircuitPlan {
        name: "semaphore",
        circuit_wasm: "semaphore.wasm",
        r1cs: "semaphore.r1cs",
        proving_key: "semaphore.pk",
        input: PlanInput::Fixture {
            artifact: "semaphore_input.json",
        },
        limb_count: 8,
        one_shot_encoding: OneShotInput::Passthrough,
    },
];

impl CircuitPlan {
    /// Build the persistent backend's input: always limb-encoded at this
    /// plan's limb width.
    ///
    /// Random-input circuits draw a fresh value per call; fixture circuits
    /// re-encode the same fixture every call.
    pub fn persistent_input(
        &self,
        fixture: Option<&Value>,
    ) -> Result<NamedCircuitInput, EncodeError> {
        let fields = self.raw_fields(fixture)?;
        build_named_input(
            &fields,
            SignalEncoding::Limb {
                limb_count: self.limb_count,
            },
        )
    }

    /// Build the one-shot backend's input per this plan's encoding.
    pub fn one_shot_input(
        &self,
        fixture: Option<&Value>,
    ) -> Result<NamedCircuitInput, EncodeError> {
        let fields = self.raw_fields(fixture)?;
        match self.one_shot_encoding {
            OneShotInput::Bits => build_named_input(&fields, SignalEncoding::Bit),
            OneShotInput::Passthrough => NamedCircuitInput::passthrough(&fields),
        }
    }

    /// A short human-readable description of the input source.
    pub fn input_description(&self) -> String {
        match self.input {
            PlanInput::Random {
                byte_length,
                signal,
            } => format!("{byte_length} random bytes into signal {signal:?}"),
            PlanInput::Fixture { artifact } => format!("fixture {artifact}"),
        }
    }

    fn raw_fields(&self, fixture: Option<&Value>) -> Result<Vec<(String, RawSignal)>, EncodeError> {
        match (self.input, fixture) {
            (
                PlanInput::Random {
                    byte_length,
                    signal,
                },
                None,
            ) => {
                let value = NumericInput::random(byte_length)?;
                Ok(vec![(
                    signal.to_string(),
                    RawSignal::Bytes(value.as_bytes().to_vec()),
                )])
            }
            (PlanInput::Fixture { .. }, Some(fixture)) => signals_from_json(fixture),
            (PlanInput::Random { .. }, Some(_)) => Err(EncodeError::InvalidArgument(format!(
                "circuit {} takes random input, not a fixture",
                self.name
            ))),
            (PlanInput::Fixture { artifact }, None) => Err(EncodeError::InvalidArgument(format!(
                "circuit {} requires the {artifact} fixture",
                self.name
            ))),
        }
    }
}

/// Look up a plan by circuit name.
pub fn find(name: &str) -> Option<&'static CircuitPlan> {
    PLANS.iter().find(|plan| plan.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoder::EncodedSignal;

    #[test]
    fn every_plan_is_reachable_by_name() {
        for plan in &PLANS {
            assert_eq!(find(plan.name).map(|p| p.name), Some(plan.name));
        }
        assert!(find("blake2").is_none());
    }

    #[test]
    fn keccak_persistent_input_is_one_eight_limb_signal() {
        let plan = find("keccak256").expect("plan");
        let input = plan.persistent_input(None).expect("input");
        assert_eq!(input.entries().len(), 1);
        let (name, value) = &input.entries()[0];
        assert_eq!(name, "in");
        match value {
            EncodedSignal::Limbs(limbs) => assert_eq!(limbs.len(), 8),
            other => panic!("expected limbs, got {other:?}"),
        }
    }

    #[test]
    fn keccak_one_shot_input_is_256_bits() {
        let plan = find("keccak256").expect("plan");
        let input = plan.one_shot_input(None).expect("input");
        let (name, value) = &input.entries()[0];
        assert_eq!(name, "in");
        match value {
            EncodedSignal::Bits(bits) => assert_eq!(bits.len(), 256),
            other => panic!("expected bits, got {other:?}"),
        }
    }

    #[test]
    fn rsa_fixture_limb_encodes_for_the_persistent_backend() {
        let plan = find("rsa").expect("plan");
        let fixture = serde_json::json!({
            "signature": ["4294967296"],
            "modulus": ["7"],
        });
        let input = plan.persistent_input(Some(&fixture)).expect("input");
        let serialized = input.to_pairs_json().expect("serialize");
        assert!(serialized.starts_with(r#"[["modulus",[["#));

        match &input.entries()[1].1 {
            EncodedSignal::LimbSeq(seq) => {
                assert_eq!(seq.len(), 1);
                assert_eq!(seq[0].len(), 64);
                assert_eq!(&seq[0][..2], &[0, 1]);
            }
            other => panic!("expected limb sequence, got {other:?}"),
        }
    }

    #[test]
    fn semaphore_one_shot_input_passes_the_fixture_through() {
        let plan = find("semaphore").expect("plan");
        let fixture = serde_json::json!({
            "identityNullifier": "77",
            "treePathIndices": ["0", "1"],
        });
        let input = plan.one_shot_input(Some(&fixture)).expect("input");
        assert_eq!(input.to_object_value(), fixture);
    }

    #[test]
    fn fixture_circuits_demand_their_fixture() {
        let plan = find("rsa").expect("plan");
        assert!(plan.persistent_input(None).is_err());
        let keccak = find("keccak256").expect("plan");
        let fixture = serde_json::json!({ "in": "1" });
        assert!(keccak.persistent_input(Some(&fixture)).is_err());
    }
}
