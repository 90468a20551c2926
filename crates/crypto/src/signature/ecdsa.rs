use num_bigint::BigUint;

use crate::algebra::curve::{AffinePoint, ProjectivePoint, CURVE_G, CURVE_ORDER};
use crate::algebra::field::CurveOrderFieldElement;
use crate::signature::drbg::HmacDrbg;

/// An ECDSA signature `(r, s)` over the STARK curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: CurveOrderFieldElement,
    pub s: CurveOrderFieldElement,
}

/// Signature error
#[derive(Debug, Eq, PartialEq, Clone, Copy, thiserror::Error)]
pub enum SignatureError {
    /// Error if the signature is invalid during verification.
    #[error("invalid signature")]
    Signature,

    /// Error for invalid randomness.
    #[error("invalid randomness")]
    Randomness,

    /// Error for invalid secret key.
    #[error("invalid secret key")]
    SecretKey,

    /// Error for invalid public key.
    #[error("invalid public key")]
    PublicKey,
}

/// Retrieve the public key point `sk * G` for a non-zero private key.
pub fn get_pk(sk: &CurveOrderFieldElement) -> Result<AffinePoint, SignatureError> {
    if sk.is_zero() {
        return Err(SignatureError::SecretKey);
    }
    Ok(AffinePoint::gen_multiply_elm(sk))
}

/// Brings an integer into the range of the curve order the way `elliptic` does.
///
/// The value is shifted right by however many bits its whole-byte length
/// exceeds the 252 bit order. Unless `shift_only` is set, a result which is
/// still not below the order is reduced by a single subtraction.
///
/// Note that this is not idempotent for values wider than 252 bits: the
/// first pass can leave a value wider than 248 bits, which the next pass
/// shifts again. A 63 digit hex value loses its last digit to the shift and
/// is stable from then on.
pub fn truncate_to_order(value: &BigUint, shift_only: bool) -> BigUint {
    let byte_bits = value.bits().div_ceil(8) * 8;
    let delta = byte_bits.saturating_sub(CURVE_ORDER.bits());
    let mut truncated = value >> delta;
    if !shift_only && truncated >= *CURVE_ORDER {
        truncated -= &*CURVE_ORDER;
    }
    truncated
}

/// Signs the message value `z` with deterministic nonces, not constant time!
///
/// `z` is truncated to the curve order exactly once before use. Nonce
/// candidates are drawn from an HMAC-DRBG seeded with the private key and
/// the truncated message, both as 32 byte big-endian values, and rejected
/// until a valid signature comes out. No low-s normalisation is applied.
pub fn ecdsa_sign(sk: &CurveOrderFieldElement, z: &BigUint) -> Result<Signature, SignatureError> {
    if sk.is_zero() {
        return Err(SignatureError::SecretKey);
    }
    let z = CurveOrderFieldElement::new(truncate_to_order(z, false));

    let mut drbg = HmacDrbg::new(&sk.to_be_bytes(), &z.to_be_bytes());
    let order_bytes = CURVE_ORDER.bits().div_ceil(8) as usize;
    loop {
        let candidate = BigUint::from_bytes_be(&drbg.generate(order_bytes));
        let k = truncate_to_order(&candidate, true);
        match ecdsa_sign_k(sk, &z, &k) {
            Ok(signature) => return Ok(signature),
            Err(SignatureError::Randomness) => {
                tracing::trace!("Rejected nonce candidate, drawing another");
                continue;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Generate a signature `(r,s)` on the already truncated message `z` with
/// secret key `sk` and explicit randomness `k`, not constant time!
///
/// Never sign the same message with the same randomness twice, or your key may be extracted.
pub fn ecdsa_sign_k(
    sk: &CurveOrderFieldElement,
    z: &CurveOrderFieldElement,
    k: &BigUint,
) -> Result<Signature, SignatureError> {
    if sk.is_zero() {
        return Err(SignatureError::SecretKey);
    }
    // Accept only 1 < k < n - 1.
    let upper = &*CURVE_ORDER - 1u32;
    if *k <= BigUint::from(1u32) || *k >= upper {
        return Err(SignatureError::Randomness);
    }
    let k = CurveOrderFieldElement::new(k.clone());

    let x = AffinePoint::gen_multiply_elm(&k).x;
    let r = CurveOrderFieldElement::new(x.into_biguint());
    if r.is_zero() {
        return Err(SignatureError::Randomness);
    }

    let kinv = k.inverse().ok_or(SignatureError::Randomness)?;
    let s = kinv * (z + &r * sk);
    if s.is_zero() {
        return Err(SignatureError::Randomness);
    }

    Ok(Signature { r, s })
}

/// Verify an ECDSA signature on message value `z` given a full public key.
///
/// `z` is truncated to the curve order just like when signing. Both `r` and
/// `s` must be non-zero, there is no further bound on their size.
pub fn ecdsa_verify(
    pk: &AffinePoint,
    z: &BigUint,
    signature: &Signature,
) -> Result<(), SignatureError> {
    if pk.infinity || !pk.is_on_curve() {
        return Err(SignatureError::PublicKey);
    }
    if signature.r.is_zero() || signature.s.is_zero() {
        return Err(SignatureError::Signature);
    }
    let z = CurveOrderFieldElement::new(truncate_to_order(z, false));

    // Compute u1 = z/s and u2 = r/s
    let sinv = signature.s.inverse().ok_or(SignatureError::Signature)?;
    let u1 = &z * &sinv;
    let u2 = &signature.r * &sinv;

    // Compute u1*G + u2*pk
    let mut point = ProjectivePoint::from(&*CURVE_G).multiply_elm(&u1);
    point.add(&ProjectivePoint::from(pk).multiply_elm(&u2));
    let point = AffinePoint::from(&point);
    if point.infinity {
        return Err(SignatureError::Signature);
    }

    if CurveOrderFieldElement::new(point.x.into_biguint()) == signature.r {
        Ok(())
    } else {
        Err(SignatureError::Signature)
    }
}
