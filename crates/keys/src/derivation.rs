use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use starkex_crypto::hash::keccak256;
use starkex_crypto::signature::get_pk;
use starkex_crypto::{AffinePoint, CurveOrderFieldElement};

use crate::encoding::{decode_hex, parse_private_key};
use crate::KeyError;

/// A STARK curve key pair, every component as 64 lowercase hex digits without prefix.
///
/// `public_key_x` is what StarkEx calls the Stark key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarkKeyPair {
    pub private_key: String,
    pub public_key_x: String,
    pub public_key_y: String,
}

impl StarkKeyPair {
    /// Recomputes the public half of an existing private key.
    pub fn from_private_key(private_key: &str) -> Result<Self, KeyError> {
        let scalar = parse_private_key(private_key)?;
        Self::from_scalar(&scalar)
    }

    fn from_scalar(scalar: &CurveOrderFieldElement) -> Result<Self, KeyError> {
        let public = get_pk(scalar).map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self::from_parts(scalar, &public))
    }

    fn from_parts(private: &CurveOrderFieldElement, public: &AffinePoint) -> Self {
        Self {
            private_key: private.to_hex(),
            public_key_x: public.x.to_hex(),
            public_key_y: public.y.to_hex(),
        }
    }

    /// The Stark key with `0x` prefix, as it is submitted on chain.
    pub fn stark_key(&self) -> String {
        format!("0x{}", self.public_key_x)
    }
}

/// Derives a key pair from arbitrary hex data, usually a wallet signature.
///
/// The private key is the Keccak-256 digest of the data shifted right by 5
/// bits, which always leaves it below the curve order. It is deliberately
/// not reduced modulo the order, otherwise keys derived elsewhere would not
/// be reproduced.
pub fn derive_key_pair(hex_data: &str) -> Result<StarkKeyPair, KeyError> {
    let data = decode_hex(hex_data)?;
    let private = BigUint::from_bytes_be(&keccak256(&data)) >> 5u32;
    tracing::trace!(bits = private.bits(), "Hashed derivation input");

    let scalar =
        CurveOrderFieldElement::try_from(private).map_err(|_| KeyError::InvalidPrivateKey)?;
    let key_pair = StarkKeyPair::from_scalar(&scalar)?;

    tracing::debug!(stark_key = %key_pair.stark_key(), "Derived key pair");
    Ok(key_pair)
}
