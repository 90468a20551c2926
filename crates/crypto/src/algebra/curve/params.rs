//! Constants for the stark curve, see the <https://docs.starkware.co/starkex/crypto/stark-curve.html>
use std::sync::LazyLock;

use const_decoder::Decoder;

use crate::algebra::curve::AffinePoint;
use crate::algebra::field::FieldElement;

const CURVE_B_BYTES: [u8; 32] =
    Decoder::Hex.decode(b"06f21413efbe40de150e596d72f7a8c5609ad26c15c915c1f4cdfcb99cee9e89");

const CURVE_GX_BYTES: [u8; 32] =
    Decoder::Hex.decode(b"01ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca");

const CURVE_GY_BYTES: [u8; 32] =
    Decoder::Hex.decode(b"005668060aa49730b7be4801df46ec62de53ecd11abe43a32873000c36e8dc1f");

/// Constant `a` from curve equation `y^2 = x^3 + a*x + b`
pub static CURVE_A: LazyLock<FieldElement> = LazyLock::new(FieldElement::one);

/// Constant `b` from curve equation `y^2 = x^3 + a*x + b`
pub static CURVE_B: LazyLock<FieldElement> =
    LazyLock::new(|| FieldElement::from_be_bytes_mod_order(&CURVE_B_BYTES));

/// The Stark curve generator G.
pub static CURVE_G: LazyLock<AffinePoint> = LazyLock::new(|| AffinePoint {
    x: FieldElement::from_be_bytes_mod_order(&CURVE_GX_BYTES),
    y: FieldElement::from_be_bytes_mod_order(&CURVE_GY_BYTES),
    infinity: false,
});
