//! Named circuit inputs
//!
//! A circuit input is an ordered mapping from signal name to an encoded
//! value. The encoding discriminant (limbs or bits) is chosen once, when a
//! benchmark plan is configured, and the same mapping then serializes into
//! the shape each backend expects:
//!
//! - *pairs form* for the persistent prover: a JSON array of
//!   `[name, [limb_array, ...]]` pairs, e.g. `[["in",[[1,2,3,4,5,6,7,8]]]]`;
//! - *object form* for the one-shot prover: a JSON object such as
//!   `{"in":[1,0,1,...]}`.
//!
//! Fixture-driven circuits whose upstream prover takes raw decimal strings
//! are modeled as passthrough signals; those serialize only in object form.

use num_bigint::BigUint;
use serde_json::{Map, Value};

use crate::bits::to_bit_array;
use crate::error::EncodeError;
use crate::limbs::{parse_decimal, to_limb_array};

/// A canonical numeric benchmark input.
///
/// Holds the big-endian source bytes so the limb view (via the integer
/// value) and the bit view (via the raw bytes) describe the same input,
/// including leading zero bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumericInput {
    bytes: Vec<u8>,
}

impl NumericInput {
    /// Draw `byte_length` bytes from the operating system entropy source and
    /// interpret them as a big-endian unsigned integer.
    ///
    /// Benchmark inputs stand in for proof-witness secrets, so this always
    /// uses a cryptographically secure source.
    pub fn random(byte_length: usize) -> Result<Self, EncodeError> {
        if byte_length == 0 {
            return Err(EncodeError::invalid("input byte length must be at least 1"));
        }
        let mut bytes = vec![0u8; byte_length];
        getrandom::getrandom(&mut bytes)?;
        Ok(Self { bytes })
    }

    /// Wrap existing big-endian bytes.
    pub fn from_bytes_be(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Parse a non-negative decimal string, as found in fixture files.
    pub fn from_decimal_str(s: &str) -> Result<Self, EncodeError> {
        let value = parse_decimal(s)?;
        Ok(Self {
            bytes: value.to_bytes_be(),
        })
    }

    /// The big-endian source bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The input as an arbitrary-precision integer.
    pub fn value(&self) -> BigUint {
        BigUint::from_bytes_be(&self.bytes)
    }

    /// The input as `limb_count` little-endian 32-bit limbs.
    pub fn to_limbs(&self, limb_count: usize) -> Result<Vec<u32>, EncodeError> {
        to_limb_array(&self.value(), limb_count)
    }

    /// The input as an MSB-first bit array over the source bytes.
    pub fn to_bits(&self) -> Vec<u8> {
        to_bit_array(&self.bytes)
    }
}

/// An unencoded signal value, as read from a fixture file or drawn at
/// random.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawSignal {
    /// A single decimal-string value.
    Decimal(String),
    /// A sequence of decimal-string values.
    DecimalSeq(Vec<String>),
    /// A raw byte blob, big-endian when read as an integer.
    Bytes(Vec<u8>),
}

/// Which physical representation a backend expects, resolved once at plan
/// configuration time rather than re-inferred per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalEncoding {
    /// Fixed-width 32-bit little-endian limb arrays.
    Limb {
        /// Number of limbs per encoded value.
        limb_count: usize,
    },
    /// MSB-first bit arrays.
    Bit,
}

/// An encoded signal value inside a [`NamedCircuitInput`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodedSignal {
    /// One limb array.
    Limbs(Vec<u32>),
    /// A sequence of limb arrays, one per element of a sequence signal.
    LimbSeq(Vec<Vec<u32>>),
    /// One bit array.
    Bits(Vec<u8>),
    /// A passthrough decimal string, forwarded unencoded.
    Decimal(String),
    /// A passthrough sequence of decimal strings.
    DecimalSeq(Vec<String>),
}

/// Ordered signal-name-to-value mapping for one proof request.
///
/// Keys are unique; insertion order is preserved so serialization is
/// deterministic (the downstream circuit interface itself is keyed, not
/// ordered).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamedCircuitInput {
    entries: Vec<(String, EncodedSignal)>,
}

impl NamedCircuitInput {
    /// Create an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a signal, replacing any existing value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: EncodedSignal) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// The signals in insertion order.
    pub fn entries(&self) -> &[(String, EncodedSignal)] {
        &self.entries
    }

    /// Build a passthrough input that forwards fixture decimal strings
    /// without encoding them.
    pub fn passthrough(fields: &[(String, RawSignal)]) -> Result<Self, EncodeError> {
        let mut input = Self::new();
        for (name, raw) in fields {
            let value = match raw {
                RawSignal::Decimal(s) => EncodedSignal::Decimal(s.clone()),
                RawSignal::DecimalSeq(seq) => EncodedSignal::DecimalSeq(seq.clone()),
                RawSignal::Bytes(_) => {
                    return Err(EncodeError::invalid(format!(
                        "signal {name:?}: byte input cannot be passed through unencoded"
                    )));
                }
            };
            input.insert(name, value);
        }
        Ok(input)
    }

    /// Serialize into the persistent prover's pairs form: a JSON array of
    /// `[name, [limb_array, ...]]` pairs in insertion order.
    ///
    /// A single limb array is wrapped in a one-element sequence, so scalar
    /// and sequence signals share one wire shape. Bit and passthrough
    /// signals have no pairs representation and are rejected.
    pub fn to_pairs_json(&self) -> Result<String, EncodeError> {
        let mut pairs: Vec<(&str, Vec<&[u32]>)> = Vec::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            let nested: Vec<&[u32]> = match value {
                EncodedSignal::Limbs(limbs) => vec![limbs.as_slice()],
                EncodedSignal::LimbSeq(seq) => seq.iter().map(Vec::as_slice).collect(),
                EncodedSignal::Bits(_)
                | EncodedSignal::Decimal(_)
                | EncodedSignal::DecimalSeq(_) => {
                    return Err(EncodeError::invalid(format!(
                        "signal {name:?} is not limb-encoded and has no pairs form"
                    )));
                }
            };
            pairs.push((name.as_str(), nested));
        }
        Ok(serde_json::to_string(&pairs)?)
    }

    /// Serialize into the one-shot prover's object form.
    pub fn to_object_value(&self) -> Value {
        let mut object = Map::new();
        for (name, value) in &self.entries {
            let json = match value {
                EncodedSignal::Limbs(limbs) => {
                    Value::Array(limbs.iter().map(|limb| Value::from(*limb)).collect())
                }
                EncodedSignal::LimbSeq(seq) => Value::Array(
                    seq.iter()
                        .map(|limbs| {
                            Value::Array(limbs.iter().map(|limb| Value::from(*limb)).collect())
                        })
                        .collect(),
                ),
                EncodedSignal::Bits(bits) => {
                    Value::Array(bits.iter().map(|bit| Value::from(*bit)).collect())
                }
                EncodedSignal::Decimal(s) => Value::String(s.clone()),
                EncodedSignal::DecimalSeq(seq) => {
                    Value::Array(seq.iter().cloned().map(Value::String).collect())
                }
            };
            object.insert(name.clone(), json);
        }
        Value::Object(object)
    }

    /// Serialize the object form to a JSON string.
    pub fn to_object_json(&self) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(&self.to_object_value())?)
    }
}

/// Encode raw signals into a [`NamedCircuitInput`] under one encoding.
///
/// A raw value that is itself a sequence maps to a sequence of encoded
/// values, one encoding per element. Byte blobs limb-encode through their
/// big-endian integer value and bit-encode directly; decimal strings only
/// limb-encode (no benchmarked circuit feeds decimals to a bit signal).
pub fn build_named_input(
    fields: &[(String, RawSignal)],
    encoding: SignalEncoding,
) -> Result<NamedCircuitInput, EncodeError> {
    let mut input = NamedCircuitInput::new();
    for (name, raw) in fields {
        let value = match (encoding, raw) {
            (SignalEncoding::Limb { limb_count }, RawSignal::Decimal(s)) => {
                EncodedSignal::Limbs(crate::limbs::decimal_string_to_limb_array(s, limb_count)?)
            }
            (SignalEncoding::Limb { limb_count }, RawSignal::DecimalSeq(seq)) => {
                let mut encoded = Vec::with_capacity(seq.len());
                for s in seq {
                    encoded.push(crate::limbs::decimal_string_to_limb_array(s, limb_count)?);
                }
                EncodedSignal::LimbSeq(encoded)
            }
            (SignalEncoding::Limb { limb_count }, RawSignal::Bytes(bytes)) => EncodedSignal::Limbs(
                to_limb_array(&BigUint::from_bytes_be(bytes), limb_count)?,
            ),
            (SignalEncoding::Bit, RawSignal::Bytes(bytes)) => {
                EncodedSignal::Bits(to_bit_array(bytes))
            }
            (SignalEncoding::Bit, RawSignal::Decimal(_) | RawSignal::DecimalSeq(_)) => {
                return Err(EncodeError::invalid(format!(
                    "signal {name:?}: decimal input cannot be bit-encoded"
                )));
            }
        };
        input.insert(name, value);
    }
    Ok(input)
}

/// Read raw signals out of a fixture JSON object.
///
/// Fixture files map signal names to decimal strings, numbers, or flat
/// arrays of either. Anything else is rejected with the offending signal
/// name.
pub fn signals_from_json(fixture: &Value) -> Result<Vec<(String, RawSignal)>, EncodeError> {
    let object = fixture.as_object().ok_or_else(|| {
        EncodeError::invalid("fixture input must be a JSON object of signal values")
    })?;

    let mut fields = Vec::with_capacity(object.len());
    for (name, value) in object {
        let raw = match value {
            Value::String(s) => RawSignal::Decimal(s.clone()),
            Value::Number(n) => RawSignal::Decimal(n.to_string()),
            Value::Array(items) => {
                let mut seq = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => seq.push(s.clone()),
                        Value::Number(n) => seq.push(n.to_string()),
                        other => {
                            return Err(EncodeError::invalid(format!(
                                "signal {name:?}: unsupported fixture element {other}"
                            )));
                        }
                    }
                }
                RawSignal::DecimalSeq(seq)
            }
            other => {
                return Err(EncodeError::invalid(format!(
                    "signal {name:?}: unsupported fixture value {other}"
                )));
            }
        };
        fields.push((name.clone(), raw));
    }
    Ok(fields)
}
