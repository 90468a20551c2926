use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-DRBG over SHA-256 (NIST SP 800-90A) used to derive deterministic
/// ECDSA nonces.
///
/// Only the subset needed for signing is supported: instantiation from
/// entropy and nonce without personalisation, and generation without
/// additional input. The reseed counter is not tracked since a single
/// signature never comes close to the reseed interval.
pub struct HmacDrbg {
    k: [u8; 32],
    v: [u8; 32],
}

impl HmacDrbg {
    pub fn new(entropy: &[u8], nonce: &[u8]) -> Self {
        let mut drbg = Self {
            k: [0x00; 32],
            v: [0x01; 32],
        };
        drbg.update(Some(&[entropy, nonce][..]));
        drbg
    }

    /// Generates the next `len` pseudo-random bytes.
    pub fn generate(&mut self, len: usize) -> Vec<u8> {
        let mut output = Vec::with_capacity(len + 32);
        while output.len() < len {
            self.v = self.hmac(&[&self.v[..]], None);
            output.extend_from_slice(&self.v);
        }
        output.truncate(len);
        self.update(None);
        output
    }

    fn update(&mut self, seed: Option<&[&[u8]]>) {
        self.k = self.hmac(&[&self.v[..], &[0x00][..]], seed);
        self.v = self.hmac(&[&self.v[..]], None);

        if seed.is_none() {
            return;
        }

        self.k = self.hmac(&[&self.v[..], &[0x01][..]], seed);
        self.v = self.hmac(&[&self.v[..]], None);
    }

    fn hmac(&self, parts: &[&[u8]], seed: Option<&[&[u8]]>) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(&self.k).expect("HMAC accepts keys of any size");
        for part in parts.iter().chain(seed.unwrap_or_default()) {
            mac.update(part);
        }
        mac.finalize().into_bytes().into()
    }
}
