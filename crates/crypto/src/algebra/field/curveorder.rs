use bitvec::order::Msb0;
use bitvec::vec::BitVec;

use super::derive::prime_field;
use super::{FieldElement, OverflowError, CURVE_ORDER};

prime_field!(
    /// Scalar modulo the curve order
    /// n = 3618502788666131213697322783095070105526743751716087489154079457884512865583
    CurveOrderFieldElement,
    CURVE_ORDER
);

impl CurveOrderFieldElement {
    /// Big-endian bits of the canonical 256-bit representation.
    pub fn to_be_bits(&self) -> BitVec<u8, Msb0> {
        BitVec::from_vec(self.to_be_bytes().to_vec())
    }
}

impl TryFrom<&FieldElement> for CurveOrderFieldElement {
    type Error = OverflowError;

    /// Converts a base field element if it is less than the curve order.
    fn try_from(value: &FieldElement) -> Result<Self, Self::Error> {
        Self::try_from(value.as_biguint().clone())
    }
}

impl From<&CurveOrderFieldElement> for FieldElement {
    fn from(value: &CurveOrderFieldElement) -> Self {
        // The curve order is smaller than the field prime.
        FieldElement::new(value.as_biguint().clone())
    }
}
