/// Errors produced while deriving keys, signing or verifying.
///
/// None of these are transient, retrying with the same input fails again.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
    #[error("Message hash has {length} significant hex digits, at most 63 are supported")]
    InvalidHashLength { length: usize },
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Unsupported instance: {0}")]
    UnsupportedInstance(String),
    #[error("Wallet failed to produce a signature")]
    Wallet(#[source] anyhow::Error),
}

impl KeyError {
    pub(crate) fn encoding(what: impl std::fmt::Display) -> Self {
        Self::InvalidEncoding(what.to_string())
    }
}
