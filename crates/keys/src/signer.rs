use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use starkex_crypto::algebra::curve::CURVE_ORDER;
use starkex_crypto::algebra::field::strip_hex_prefix;
use starkex_crypto::hash::keccak256;
use starkex_crypto::signature::{ecdsa_sign, ecdsa_verify, get_pk, Signature, SignatureError};
use starkex_crypto::{AffinePoint, CurveOrderFieldElement, FieldElement};

use crate::encoding::{decode_hex, encode_prefixed, parse_coordinate, parse_private_key};
use crate::KeyError;

/// Number of hex digits in an `rsy` string, without its prefix.
const RSY_DIGITS: usize = 3 * 64;

/// A signature as submitted to StarkEx: `r`, `s` and the signer's public `y`
/// coordinate, each `0x` prefixed and 64 digits long, plus their concatenation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBundle {
    pub r: String,
    pub s: String,
    pub y: String,
    pub rsy: String,
}

impl SignatureBundle {
    fn new(signature: &Signature, y: &FieldElement) -> Self {
        let r = encode_prefixed(signature.r.as_biguint());
        let s = encode_prefixed(signature.s.as_biguint());
        let y = encode_prefixed(y.as_biguint());
        let rsy = format!("0x{}{}{}", &r[2..], &s[2..], &y[2..]);
        Self { r, s, y, rsy }
    }

    /// Splits a `0x` prefixed `rsy` string of 192 digits back into its parts.
    pub fn from_rsy(rsy: &str) -> Result<Self, KeyError> {
        let digits = strip_hex_prefix(rsy);
        if digits.len() != RSY_DIGITS || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(KeyError::encoding(format_args!(
                "rsy must be {RSY_DIGITS} hex digits, got {rsy:?}"
            )));
        }
        let digits = digits.to_ascii_lowercase();
        let (r, rest) = digits.split_at(64);
        let (s, y) = rest.split_at(64);
        Ok(Self {
            r: format!("0x{r}"),
            s: format!("0x{s}"),
            y: format!("0x{y}"),
            rsy: format!("0x{digits}"),
        })
    }

    /// `None` when `r` or `s` is not below the curve order, such a signature
    /// can never be valid.
    fn to_signature(&self) -> Result<Option<Signature>, KeyError> {
        let r = CurveOrderFieldElement::try_from(parse_coordinate(&self.r)?);
        let s = CurveOrderFieldElement::try_from(parse_coordinate(&self.s)?);
        match (r, s) {
            (Ok(r), Ok(s)) => Ok(Some(Signature { r, s })),
            _ => Ok(None),
        }
    }
}

/// Keccak-256 of the decoded message, reduced modulo the curve order.
pub fn message_hash(hex_message: &str) -> Result<BigUint, KeyError> {
    let message = decode_hex(hex_message)?;
    Ok(BigUint::from_bytes_be(&keccak256(&message)) % &*CURVE_ORDER)
}

/// Adjusts a hex encoded message hash before it is signed.
///
/// Leading zeros are dropped. Up to 62 significant digits are kept as they
/// are, 63 digits get a `0` appended and anything longer is rejected. The
/// appended digit is compensated by the 4 bit truncation the signer applies
/// to 256 bit messages, so StarkEx sees the original hash.
pub fn fix_message_hash(hash_hex: &str) -> Result<String, KeyError> {
    let digits = strip_hex_prefix(hash_hex);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(KeyError::encoding(format_args!(
            "message hash {hash_hex:?} is not hex"
        )));
    }
    let digits = digits.trim_start_matches('0');
    match digits.len() {
        0..=62 => Ok(digits.to_owned()),
        63 => Ok(format!("{digits}0")),
        length => Err(KeyError::InvalidHashLength { length }),
    }
}

fn signing_value(hex_message: &str) -> Result<BigUint, KeyError> {
    let hash = message_hash(hex_message)?;
    let fixed = fix_message_hash(&format!("{hash:x}"))?;
    if fixed.is_empty() {
        return Ok(BigUint::zero());
    }
    BigUint::parse_bytes(fixed.as_bytes(), 16)
        .ok_or_else(|| KeyError::encoding(format_args!("message hash {fixed:?}")))
}

/// Signs hex encoded message bytes with a private key of up to 64 hex digits.
///
/// Signatures are deterministic: the same key and message always produce the
/// same bundle.
pub fn sign_message(private_key: &str, hex_message: &str) -> Result<SignatureBundle, KeyError> {
    let secret = parse_private_key(private_key)?;
    let z = signing_value(hex_message)?;

    let signature = ecdsa_sign(&secret, &z).map_err(|_| KeyError::InvalidPrivateKey)?;
    let public = get_pk(&secret).map_err(|_| KeyError::InvalidPrivateKey)?;

    tracing::debug!(r = %signature.r, "Signed message");
    Ok(SignatureBundle::new(&signature, &public.y))
}

/// Checks an `rsy` signature over hex encoded message bytes against a full public key.
///
/// Malformed input is an error, a well formed signature which does not match
/// yields `false`. The `y` inside `rsy` has to agree with `public_key_y`.
pub fn verify_message(
    public_key_x: &str,
    public_key_y: &str,
    hex_message: &str,
    rsy: &str,
) -> Result<bool, KeyError> {
    let public = public_key(public_key_x, public_key_y)?;
    let bundle = SignatureBundle::from_rsy(rsy)?;
    let z = signing_value(hex_message)?;
    let Some(signature) = bundle.to_signature()? else {
        tracing::debug!("Signature component exceeds the curve order");
        return Ok(false);
    };

    if parse_coordinate(&bundle.y)? != *public.y.as_biguint() {
        tracing::debug!("Signature carries a different y coordinate");
        return Ok(false);
    }

    match ecdsa_verify(&public, &z, &signature) {
        Ok(()) => Ok(true),
        Err(SignatureError::Signature) => Ok(false),
        Err(e) => Err(KeyError::encoding(e)),
    }
}

fn public_key(x: &str, y: &str) -> Result<AffinePoint, KeyError> {
    let coordinate = |value: &str| {
        FieldElement::try_from(parse_coordinate(value)?)
            .map_err(|_| KeyError::encoding(format_args!("{value} exceeds the field prime")))
    };
    AffinePoint::new(coordinate(x)?, coordinate(y)?)
        .ok_or_else(|| KeyError::encoding("public key is not on the STARK curve"))
}
