mod drbg;
mod ecdsa;

pub use drbg::HmacDrbg;
pub use ecdsa::{
    ecdsa_sign, ecdsa_sign_k, ecdsa_verify, get_pk, truncate_to_order, Signature, SignatureError,
};
