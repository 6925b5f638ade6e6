//! Bit-array expansion
//!
//! The one-shot prover consumes byte inputs as flat arrays of single bits,
//! most significant bit of each byte first, in input byte order.

use crate::error::EncodeError;

/// Expand `bytes` into one bit per element, MSB-first per byte.
///
/// The result has length exactly `8 * bytes.len()`.
pub fn to_bit_array(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len().saturating_mul(8));
    for byte in bytes {
        for shift in (0..8u32).rev() {
            bits.push(byte.wrapping_shr(shift) & 1);
        }
    }
    bits
}

/// Pack a bit array produced by [`to_bit_array`] back into bytes.
///
/// Fails if the length is not a multiple of 8 or any element is not 0 or 1.
pub fn bits_to_bytes(bits: &[u8]) -> Result<Vec<u8>, EncodeError> {
    if !bits.len().is_multiple_of(8) {
        return Err(EncodeError::invalid(format!(
            "bit array length {} is not a multiple of 8",
            bits.len()
        )));
    }

    let mut bytes = Vec::with_capacity(bits.len() / 8);
    for chunk in bits.chunks_exact(8) {
        let mut byte = 0u8;
        for bit in chunk {
            if *bit > 1 {
                return Err(EncodeError::invalid(format!(
                    "bit array element {bit} is not a bit"
                )));
            }
            byte = byte.wrapping_shl(1) | bit;
        }
        bytes.push(byte);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_is_eight_per_byte() {
        for len in [1usize, 2, 32, 64] {
            let bytes = vec![0xa5u8; len];
            assert_eq!(to_bit_array(&bytes).len(), len.checked_mul(8).expect("len"));
        }
    }

    #[test]
    fn expands_msb_first() {
        assert_eq!(to_bit_array(&[0b1000_0001]), vec![1, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(to_bit_array(&[0x0f]), vec![0, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn round_trips_bytes() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let bits = to_bit_array(&bytes);
        assert_eq!(bits_to_bytes(&bits).expect("pack"), bytes);
    }

    #[test]
    fn rejects_ragged_and_non_bit_input() {
        assert!(bits_to_bytes(&[1, 0, 1]).is_err());
        assert!(bits_to_bytes(&[0, 0, 0, 0, 0, 0, 0, 2]).is_err());
    }
}
