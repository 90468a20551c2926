//! Cryptographic primitives for StarkEx off-chain identities.
//!
//! Everything in here has to agree bit for bit with the StarkEx verifying
//! contracts, so the arithmetic is kept simple and explicit: arbitrary
//! precision integers reduced modulo the STARK field prime or the curve order.

/// Contains algebra such as finite fields and elliptic curves.
pub mod algebra;

/// Contains hash functions such as Keccak-256.
pub mod hash;

/// Contains signature functions such as ECDSA.
pub mod signature;

pub use algebra::{
    AffinePoint, CurveOrderFieldElement, FieldElement, HexParseError, OverflowError,
    ProjectivePoint,
};
