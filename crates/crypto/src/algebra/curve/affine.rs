use bitvec::order::Msb0;
use bitvec::slice::BitSlice;

use crate::algebra::curve::{ProjectivePoint, CURVE_A, CURVE_B, CURVE_G};
use crate::algebra::field::{CurveOrderFieldElement, FieldElement, HexParseError};

/// An affine point on the Stark curve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AffinePoint {
    pub x: FieldElement,
    pub y: FieldElement,
    pub infinity: bool,
}

impl From<&ProjectivePoint> for AffinePoint {
    fn from(p: &ProjectivePoint) -> Self {
        let zinv = match p.z.inverse() {
            Some(zinv) if !p.infinity => zinv,
            _ => return AffinePoint::identity(),
        };
        AffinePoint {
            x: &p.x * &zinv,
            y: &p.y * &zinv,
            infinity: false,
        }
    }
}

impl AffinePoint {
    /// Creates a point from its coordinates, checking it lies on the curve.
    pub fn new(x: FieldElement, y: FieldElement) -> Option<Self> {
        let p = AffinePoint {
            x,
            y,
            infinity: false,
        };
        p.is_on_curve().then_some(p)
    }

    /// Create a point from (x,y) in hexadecimal
    pub fn from_hex(x: &str, y: &str) -> Result<Self, HexParseError> {
        Ok(Self {
            x: FieldElement::from_hex(x)?,
            y: FieldElement::from_hex(y)?,
            infinity: false,
        })
    }

    /// Point of infinity
    pub fn identity() -> Self {
        Self {
            x: FieldElement::zero(),
            y: FieldElement::zero(),
            infinity: true,
        }
    }

    /// Checks `y^2 = x^3 + a*x + b`.
    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        let lhs = self.y.square();
        let rhs = &self.x.square() * &self.x + &*CURVE_A * &self.x + &*CURVE_B;
        lhs == rhs
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
            *self = AffinePoint::identity();
            return;
        }

        // l = (3x^2+a)/2y
        let x2 = self.x.square();
        let numerator = &x2 + &x2.double() + &*CURVE_A;
        // Non-zero y was checked above.
        let denominator = match self.y.double().inverse() {
            Some(inv) => inv,
            None => return,
        };
        let lambda = numerator * denominator;

        let x = lambda.square() - self.x.double();
        let y = &lambda * &(&self.x - &x) - &self.y;

        self.x = x;
        self.y = y;
    }

    /// Add a point to this point
    pub fn add(&mut self, other: &AffinePoint) {
        if other.infinity {
            return;
        }
        if self.infinity {
            *self = other.clone();
            return;
        }
        if self.x == other.x {
            if self.y == other.y {
                self.double();
            } else {
                *self = AffinePoint::identity();
            }
            return;
        }

        // l = (y1-y0)/(x1-x0)
        let denominator = match (&other.x - &self.x).inverse() {
            Some(inv) => inv,
            None => return,
        };
        let lambda = (&other.y - &self.y) * denominator;

        let x = lambda.square() - &self.x - &other.x;
        let y = &lambda * &(&self.x - &x) - &self.y;

        self.x = x;
        self.y = y;
    }

    /// Multiply a point by a bit-representation in MSB order
    pub fn multiply(&self, bits: &BitSlice<u8, Msb0>) -> AffinePoint {
        let mut product = AffinePoint::identity();
        for b in bits.iter().by_vals() {
            product.double();
            if b {
                product.add(self);
            }
        }
        product
    }

    /// Multiply a point by a curve order field element
    pub fn multiply_elm(&self, elm: &CurveOrderFieldElement) -> AffinePoint {
        AffinePoint::from(&ProjectivePoint::from(self).multiply_elm(elm))
    }

    /// Multiply the curve generator `G` by a curve order field element.
    pub fn gen_multiply_elm(elm: &CurveOrderFieldElement) -> AffinePoint {
        CURVE_G.multiply_elm(elm)
    }
}
