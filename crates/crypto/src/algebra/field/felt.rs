use super::derive::prime_field;
use super::FIELD_PRIME;

prime_field!(
    /// Element of the STARK base field with modulus
    /// p = 3618502788666131213697322783095070105623107215331596699973092056135872020481
    FieldElement,
    FIELD_PRIME
);
