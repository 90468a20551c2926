use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use starkex_crypto::algebra::field::strip_hex_prefix;
use starkex_crypto::hash::keccak256;

use crate::encoding::{decode_hex, encode_prefixed, parse_coordinate, to_word};
use crate::signer::{sign_message, verify_message, SignatureBundle};
use crate::{KeyError, StarkKeyPair};

/// Prefix of every registration message.
pub const REGISTRATION_PREFIX: &[u8] = b"UserRegistration:";

/// Signature of the StarkEx function which links an Ethereum address to a Stark key.
pub const REGISTER_ETH_ADDRESS: &str = "registerEthAddress(address,uint256,bytes)";

/// A 20 byte Ethereum address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EthereumAddress(pub [u8; 20]);

impl FromStr for EthereumAddress {
    type Err = KeyError;

    /// Parses exactly 40 hex digits with an optional `0x` prefix. The
    /// checksum casing is not validated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if strip_hex_prefix(s).len() != 40 {
            return Err(KeyError::encoding(format_args!(
                "Ethereum address {s:?} must have 40 hex digits"
            )));
        }
        let bytes = decode_hex(s)?;
        let mut address = [0u8; 20];
        address.copy_from_slice(&bytes);
        Ok(Self(address))
    }
}

impl TryFrom<String> for EthereumAddress {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EthereumAddress> for String {
    fn from(value: EthereumAddress) -> Self {
        value.to_string()
    }
}

impl fmt::Display for EthereumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Everything needed to submit a registration on chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationProof {
    pub ethereum_address: EthereumAddress,
    pub stark_key: String,
    pub signature: SignatureBundle,
    /// Input data for a `registerEthAddress` transaction.
    pub calldata: String,
}

/// Builds the packed registration message `"UserRegistration:" ++ address ++ stark_key`.
///
/// The address is 20 bytes and the Stark key a 32 byte big-endian word. The
/// result is `0x` prefixed lowercase hex.
pub fn build_registration_message(
    ethereum_address: &str,
    stark_public_key_x: &str,
) -> Result<String, KeyError> {
    let address: EthereumAddress = ethereum_address.parse()?;
    let stark_key = parse_coordinate(stark_public_key_x)?;
    Ok(registration_message(&address, &stark_key))
}

fn registration_message(address: &EthereumAddress, stark_key: &BigUint) -> String {
    let key = encode_prefixed(stark_key);
    format!(
        "0x{}{}{}",
        hex::encode(REGISTRATION_PREFIX),
        hex::encode(address.0),
        &key[2..]
    )
}

/// Signs the registration of `key_pair` for `ethereum_address`.
pub fn sign_registration(
    ethereum_address: &str,
    key_pair: &StarkKeyPair,
) -> Result<RegistrationProof, KeyError> {
    let address: EthereumAddress = ethereum_address.parse()?;
    let stark_key = parse_coordinate(&key_pair.public_key_x)?;

    let message = registration_message(&address, &stark_key);
    let signature = sign_message(&key_pair.private_key, &message)?;
    let calldata = encode_register_eth_address_calldata(&address, &stark_key, &signature.rsy)?;

    tracing::debug!(%address, stark_key = %key_pair.stark_key(), "Signed registration");
    Ok(RegistrationProof {
        ethereum_address: address,
        stark_key: encode_prefixed(&stark_key),
        signature,
        calldata,
    })
}

/// Checks a registration signature the way the StarkEx contract does.
pub fn verify_registration(
    ethereum_address: &str,
    public_key_x: &str,
    public_key_y: &str,
    rsy: &str,
) -> Result<bool, KeyError> {
    let message = build_registration_message(ethereum_address, public_key_x)?;
    verify_message(public_key_x, public_key_y, &message, rsy)
}

/// ABI encodes a call to `registerEthAddress(address ethKey, uint256 starkKey, bytes starkSignature)`.
pub fn encode_register_eth_address_calldata(
    address: &EthereumAddress,
    stark_key: &BigUint,
    rsy: &str,
) -> Result<String, KeyError> {
    let signature = decode_hex(rsy)?;

    let mut address_word = [0u8; 32];
    address_word[12..].copy_from_slice(&address.0);
    // The dynamic `bytes` argument follows the three head words.
    let offset = to_word(&BigUint::from(3u32 * 32))?;
    let length = to_word(&BigUint::from(signature.len()))?;

    let mut calldata = Vec::with_capacity(4 + 5 * 32 + signature.len());
    calldata.extend_from_slice(&keccak256(REGISTER_ETH_ADDRESS.as_bytes())[..4]);
    calldata.extend_from_slice(&address_word);
    calldata.extend_from_slice(&to_word(stark_key)?);
    calldata.extend_from_slice(&offset);
    calldata.extend_from_slice(&length);
    calldata.extend_from_slice(&signature);
    // Pad the tail to a whole number of words.
    let padding = (32 - signature.len() % 32) % 32;
    calldata.resize(calldata.len() + padding, 0);

    Ok(format!("0x{}", hex::encode(calldata)))
}
