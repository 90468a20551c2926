/// Elliptic curves
pub mod curve;

/// Finite fields
pub mod field;

pub use curve::{AffinePoint, ProjectivePoint};
pub use field::{CurveOrderFieldElement, FieldElement, HexParseError, OverflowError};
