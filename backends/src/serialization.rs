//! Field-element byte conversions
//!
//! Public inputs travel as little-endian 32-byte field elements,
//! concatenated in witness order.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};

use crate::backend::BackendError;

/// Field element size in bytes (BN254 scalar field).
pub(crate) const FIELD_SIZE: usize = 32;

/// Convert an Fr field element to little-endian bytes.
pub(crate) fn fr_to_bytes(fr: &Fr) -> Vec<u8> {
    fr.into_bigint().to_bytes_le()
}

/// Convert little-endian bytes back to an Fr field element.
pub(crate) fn bytes_to_fr(bytes: &[u8]) -> Result<Fr, BackendError> {
    if bytes.len() != FIELD_SIZE {
        return Err(BackendError::Serialize(format!(
            "expected {FIELD_SIZE} field bytes, got {}",
            bytes.len()
        )));
    }
    Ok(Fr::from_le_bytes_mod_order(bytes))
}

/// Concatenate field elements into little-endian public-input bytes.
pub(crate) fn frs_to_bytes(elements: &[Fr]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(elements.len().saturating_mul(FIELD_SIZE));
    for fr in elements {
        bytes.extend_from_slice(&fr_to_bytes(fr));
    }
    bytes
}

/// Split concatenated public-input bytes back into field elements.
pub(crate) fn bytes_to_frs(bytes: &[u8]) -> Result<Vec<Fr>, BackendError> {
    if !bytes.len().is_multiple_of(FIELD_SIZE) {
        return Err(BackendError::Serialize(format!(
            "public input length {} is not a multiple of {FIELD_SIZE}",
            bytes.len()
        )));
    }
    let mut elements = Vec::with_capacity(bytes.len() / FIELD_SIZE);
    for chunk in bytes.chunks_exact(FIELD_SIZE) {
        elements.push(bytes_to_fr(chunk)?);
    }
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_elements_round_trip_through_bytes() {
        let elements = vec![Fr::from(0u64), Fr::from(1u64), Fr::from(u64::MAX)];
        let bytes = frs_to_bytes(&elements);
        assert_eq!(bytes.len(), 96);
        assert_eq!(bytes_to_frs(&bytes).expect("decode"), elements);
    }

    #[test]
    fn ragged_byte_lengths_are_rejected() {
        assert!(bytes_to_frs(&[0u8; 33]).is_err());
        assert!(bytes_to_fr(&[0u8; 31]).is_err());
    }
}
