use num_bigint::BigUint;
use starkex_crypto::algebra::field::{parse_hex, strip_hex_prefix};
use starkex_crypto::CurveOrderFieldElement;

use crate::KeyError;

/// Decodes hex data with an optional `0x` prefix into bytes.
///
/// An empty string (or a bare prefix) decodes to no bytes at all.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, KeyError> {
    hex::decode(strip_hex_prefix(input))
        .map_err(|e| KeyError::encoding(format_args!("{input:?} is not valid hex data: {e}")))
}

/// Formats an integer as exactly 64 lowercase hex digits without prefix.
pub fn encode_scalar(value: &BigUint) -> String {
    format!("{value:064x}")
}

/// Formats an integer as `0x` followed by exactly 64 lowercase hex digits.
pub fn encode_prefixed(value: &BigUint) -> String {
    format!("0x{value:064x}")
}

/// Parses a private key of up to 64 hex digits which must lie in `[1, n)`.
pub fn parse_private_key(input: &str) -> Result<CurveOrderFieldElement, KeyError> {
    let value = parse_hex(input).map_err(|_| KeyError::InvalidPrivateKey)?;
    let scalar = CurveOrderFieldElement::try_from(value).map_err(|_| KeyError::InvalidPrivateKey)?;
    if scalar.is_zero() {
        return Err(KeyError::InvalidPrivateKey);
    }
    Ok(scalar)
}

/// Parses a public key coordinate, such as the Stark key, of up to 64 hex digits.
pub fn parse_coordinate(input: &str) -> Result<BigUint, KeyError> {
    parse_hex(input).map_err(|e| KeyError::encoding(format_args!("{input:?}: {e}")))
}

/// Left pads the big-endian bytes of `value` to a 32 byte word.
pub(crate) fn to_word(value: &BigUint) -> Result<[u8; 32], KeyError> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(KeyError::encoding("value does not fit into 32 bytes"));
    }
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}
