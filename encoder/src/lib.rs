//! Canonical circuit-input encoding
//!
//! Both proving backends under benchmark consume the same logical input in
//! different physical representations: the persistent prover expects 32-bit
//! little-endian limb arrays, the one-shot prover expects big-endian
//! MSB-first bit arrays (or raw decimal strings for fixture-driven
//! circuits). This crate produces both from one canonical numeric source so
//! the backends are benchmarked on byte-identical inputs.
//!
//! Every operation is a pure function of its inputs; errors carry the
//! offending value and are never swallowed.

pub mod bits;
pub mod error;
pub mod input;
pub mod limbs;

pub use bits::{bits_to_bytes, to_bit_array};
pub use error::EncodeError;
pub use input::{
    EncodedSignal, NamedCircuitInput, NumericInput, RawSignal, SignalEncoding, build_named_input,
    signals_from_json,
};
pub use limbs::{decimal_string_to_limb_array, from_limb_array, to_limb_array};
