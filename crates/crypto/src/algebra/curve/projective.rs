use bitvec::order::Msb0;
use bitvec::slice::BitSlice;

use crate::algebra::curve::{AffinePoint, CURVE_A, CURVE_G};
use crate::algebra::field::{CurveOrderFieldElement, FieldElement};

/// A projective point on the Stark curve over [FieldElement].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectivePoint {
    pub x: FieldElement,
    pub y: FieldElement,
    pub z: FieldElement,
    pub infinity: bool,
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(p: &AffinePoint) -> Self {
        ProjectivePoint {
            x: p.x.clone(),
            y: p.y.clone(),
            z: FieldElement::one(),
            infinity: p.infinity,
        }
    }
}

impl ProjectivePoint {
    /// Point of infinity
    pub fn identity() -> Self {
        Self {
            x: FieldElement::zero(),
            y: FieldElement::zero(),
            z: FieldElement::one(),
            infinity: true,
        }
    }

    /// Negates a point
    pub fn negate(&mut self) {
        self.y = -&self.y;
    }

    /// Double a point
    pub fn double(&mut self) {
        if self.infinity {
            return;
        }
        if self.y.is_zero() {
            *self = ProjectivePoint::identity();
            return;
        }

        // t=3x^2+az^2
        let x2 = self.x.square();
        let t = &x2 + &x2.double() + &*CURVE_A * &self.z.square();
        let u = (&self.y * &self.z).double();
        let v = (&u * &self.x * &self.y).double();
        let w = t.square() - v.double();

        let uy = &u * &self.y;

        let x = &u * &w;
        let y = &t * &(&v - &w) - uy.square().double();
        let z = &u * &u * &u;

        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Add a point to this point
    pub fn add(&mut self, other: &ProjectivePoint) {
        if other.infinity {
            return;
        }
        if self.infinity {
            *self = other.clone();
            return;
        }
        let u0 = &self.x * &other.z;
        let u1 = &other.x * &self.z;
        let t0 = &self.y * &other.z;
        let t1 = &other.y * &self.z;
        if u0 == u1 {
            if t0 != t1 {
                *self = ProjectivePoint::identity();
            } else {
                self.double();
            }
            return;
        }

        let t = &t0 - &t1;
        let u = &u0 - &u1;
        let u2 = u.square();

        let v = &self.z * &other.z;
        let w = t.square() * &v - &u2 * &(&u0 + &u1);
        let u3 = &u * &u2;

        let x = &u * &w;
        let y = &t * &(&u0 * &u2 - &w) - &t0 * &u3;
        let z = &u3 * &v;

        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Multiply a point by a bit-representation in MSB order
    pub fn multiply(&self, bits: &BitSlice<u8, Msb0>) -> ProjectivePoint {
        let mut product = ProjectivePoint::identity();
        for b in bits.iter().by_vals() {
            product.double();
            if b {
                product.add(self);
            }
        }
        product
    }

    /// Multiply a point by a curve order field element
    pub fn multiply_elm(&self, elm: &CurveOrderFieldElement) -> ProjectivePoint {
        let bits = elm.to_be_bits();
        // Skip the leading zeros, doubling the identity is a no-op anyway.
        let start = bits.first_one().unwrap_or(bits.len());
        self.multiply(&bits[start..])
    }

    /// Multiply the curve generator `G` by a curve order field element.
    pub fn gen_multiply_elm(elm: &CurveOrderFieldElement) -> ProjectivePoint {
        ProjectivePoint::from(&*CURVE_G).multiply_elm(elm)
    }
}
