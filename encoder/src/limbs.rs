//! 32-bit limb decomposition
//!
//! The persistent prover consumes large integers as fixed-width arrays of
//! 32-bit limbs in little-endian order: limb 0 holds the low 32 bits.
//! Values wider than `limb_count * 32` bits are silently truncated, which
//! matches the fixed-width signals of the benchmarked circuits; callers are
//! responsible for picking a limb count that fits their values.

use num_bigint::BigUint;

use crate::error::EncodeError;

/// Decompose `value` into exactly `limb_count` 32-bit little-endian limbs.
///
/// Repeatedly extracts the low 32 bits and shifts right by 32. A zero value
/// yields `limb_count` zero limbs, never an empty array. Bits beyond
/// `limb_count * 32` are dropped.
pub fn to_limb_array(value: &BigUint, limb_count: usize) -> Result<Vec<u32>, EncodeError> {
    if limb_count == 0 {
        return Err(EncodeError::invalid("limb count must be at least 1"));
    }

    let mask = BigUint::from(u32::MAX);
    let mut remaining = value.clone();
    let mut limbs = Vec::with_capacity(limb_count);
    for _ in 0..limb_count {
        let low = &remaining & &mask;
        // The masked value fits a single base-2^32 digit; zero has none.
        limbs.push(low.to_u32_digits().first().copied().unwrap_or(0));
        remaining >>= 32u32;
    }
    Ok(limbs)
}

/// Recompose a little-endian limb array into the integer it encodes.
///
/// Inverse of [`to_limb_array`] for values that fit the limb width.
pub fn from_limb_array(limbs: &[u32]) -> BigUint {
    BigUint::from_slice(limbs)
}

/// Parse a non-negative decimal string and decompose it into limbs.
///
/// Rejects empty strings and strings containing non-digit characters with
/// [`EncodeError::Parse`] carrying the offending input.
pub fn decimal_string_to_limb_array(s: &str, limb_count: usize) -> Result<Vec<u32>, EncodeError> {
    let value = parse_decimal(s)?;
    to_limb_array(&value, limb_count)
}

/// Parse a non-negative arbitrary-precision decimal string.
pub(crate) fn parse_decimal(s: &str) -> Result<BigUint, EncodeError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodeError::Parse {
            input: s.to_string(),
        });
    }
    BigUint::parse_bytes(s.as_bytes(), 10).ok_or_else(|| EncodeError::Parse {
        input: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_values_that_fit() {
        for value in [0u64, 1, 0xffff_ffff, 0x1_0000_0000, u64::MAX] {
            let big = BigUint::from(value);
            let limbs = to_limb_array(&big, 8).expect("encode");
            assert_eq!(limbs.len(), 8);
            assert_eq!(from_limb_array(&limbs), big);
        }
    }

    #[test]
    fn zero_is_never_empty() {
        for limb_count in [1usize, 2, 8, 64] {
            let limbs = to_limb_array(&BigUint::ZERO, limb_count).expect("encode");
            assert_eq!(limbs, vec![0u32; limb_count]);
        }
    }

    #[test]
    fn two_pow_32_decomposes_into_second_limb() {
        let limbs = decimal_string_to_limb_array("4294967296", 8).expect("encode");
        assert_eq!(limbs, vec![0, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn zero_string_decomposes_to_zero_limbs() {
        let limbs = decimal_string_to_limb_array("0", 8).expect("encode");
        assert_eq!(limbs, vec![0u32; 8]);
    }

    #[test]
    fn excess_high_bits_are_dropped() {
        // 2^64 + 5 truncated to two limbs leaves only the low 64 bits.
        let value = (BigUint::from(1u8) << 64u32) + BigUint::from(5u8);
        let limbs = to_limb_array(&value, 2).expect("encode");
        assert_eq!(limbs, vec![5, 0]);
    }

    #[test]
    fn rejects_non_decimal_strings() {
        for bad in ["abc", "", "12a3", "-5", "0x10", " 7"] {
            let err = decimal_string_to_limb_array(bad, 8).expect_err("must fail");
            assert!(matches!(err, EncodeError::Parse { .. }), "input {bad:?}");
        }
    }

    #[test]
    fn rejects_zero_limb_count() {
        let err = to_limb_array(&BigUint::from(7u8), 0).expect_err("must fail");
        assert!(matches!(err, EncodeError::InvalidArgument(_)));
    }
}
