/// Keccak-256 as used by Ethereum.
pub mod keccak;

pub use keccak::keccak256;
