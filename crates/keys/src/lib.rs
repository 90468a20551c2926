//! StarkEx off-chain identities.
//!
//! A STARK key pair is derived deterministically from an Ethereum wallet
//! signature, and then used to sign messages such as the registration which
//! links the Stark key to the Ethereum address on chain. All outputs must
//! match what the StarkEx contracts verify, byte for byte.
mod derivation;
pub mod encoding;
mod error;
pub mod recovery;
pub mod registration;
mod signer;

pub use derivation::{derive_key_pair, StarkKeyPair};
pub use error::KeyError;
pub use recovery::{
    derivation_input, recover_key_pair, select_variant, Instance, RecoveryVariant,
    SigningMethod, WalletRequest, WalletSigner,
};
pub use registration::{
    build_registration_message, encode_register_eth_address_calldata, sign_registration,
    verify_registration, EthereumAddress, RegistrationProof,
};
pub use signer::{fix_message_hash, message_hash, sign_message, verify_message, SignatureBundle};
