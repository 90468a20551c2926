use std::sync::LazyLock;

use const_decoder::Decoder;
use num_bigint::BigUint;

mod curveorder;
mod derive;
mod felt;
mod hex;

pub use curveorder::CurveOrderFieldElement;
pub use felt::FieldElement;
pub use hex::{parse_hex, strip_hex_prefix, HexParseError};

const FIELD_PRIME_BYTES: [u8; 32] =
    Decoder::Hex.decode(b"0800000000000011000000000000000000000000000000000000000000000001");

const CURVE_ORDER_BYTES: [u8; 32] =
    Decoder::Hex.decode(b"0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f");

/// The STARK field prime `p = 2^251 + 17 * 2^192 + 1`.
pub static FIELD_PRIME: LazyLock<BigUint> =
    LazyLock::new(|| BigUint::from_bytes_be(&FIELD_PRIME_BYTES));

/// Order `n` of the STARK curve generator.
pub static CURVE_ORDER: LazyLock<BigUint> =
    LazyLock::new(|| BigUint::from_bytes_be(&CURVE_ORDER_BYTES));

/// Error returned when a value is not less than the field modulus.
#[derive(Debug, PartialEq, Eq, Clone, Copy, thiserror::Error)]
#[error("The field modulus was exceeded.")]
pub struct OverflowError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moduli_match_decimal_definition() {
        let p = BigUint::parse_bytes(
            b"3618502788666131213697322783095070105623107215331596699973092056135872020481",
            10,
        )
        .unwrap();
        let n = BigUint::parse_bytes(
            b"3618502788666131213697322783095070105526743751716087489154079457884512865583",
            10,
        )
        .unwrap();
        assert_eq!(*FIELD_PRIME, p);
        assert_eq!(*CURVE_ORDER, n);
    }

    #[test]
    fn order_is_252_bits() {
        assert_eq!(CURVE_ORDER.bits(), 252);
        assert!(*CURVE_ORDER < *FIELD_PRIME);
    }
}
