pub use affine::AffinePoint;
pub use params::{CURVE_A, CURVE_B, CURVE_G};
pub use projective::ProjectivePoint;

pub use crate::algebra::field::CURVE_ORDER;

mod affine;
mod params;
mod projective;

#[cfg(test)]
mod tests;
