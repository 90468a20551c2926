macro_rules! derive_op {
    ($type:ident, $iface:ident, $fun:ident, $inner:ident) => {
        impl std::ops::$iface<&$type> for &$type {
            type Output = $type;
            fn $fun(self, rhs: &$type) -> Self::Output {
                $type::$inner(self, rhs)
            }
        }
        impl std::ops::$iface<$type> for &$type {
            type Output = $type;
            fn $fun(self, rhs: $type) -> Self::Output {
                $type::$inner(self, &rhs)
            }
        }
        impl std::ops::$iface<&$type> for $type {
            type Output = $type;
            fn $fun(self, rhs: &$type) -> Self::Output {
                $type::$inner(&self, rhs)
            }
        }
        impl std::ops::$iface<$type> for $type {
            type Output = $type;
            fn $fun(self, rhs: $type) -> Self::Output {
                $type::$inner(&self, &rhs)
            }
        }
    };
}
pub(crate) use derive_op;

macro_rules! derive_op_assign {
    ($type:ident, $iface:ident, $fun:ident, $inner:ident) => {
        impl std::ops::$iface<&$type> for $type {
            fn $fun(&mut self, rhs: &$type) {
                *self = $type::$inner(self, rhs);
            }
        }
        impl std::ops::$iface<$type> for $type {
            fn $fun(&mut self, rhs: $type) {
                *self = $type::$inner(self, &rhs);
            }
        }
    };
}
pub(crate) use derive_op_assign;

/// Defines a prime field element backed by a [num_bigint::BigUint] which is
/// always kept fully reduced modulo `$modulus`.
macro_rules! prime_field {
    ($(#[$attr:meta])* $type:ident, $modulus:ident) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $type(num_bigint::BigUint);

        impl $type {
            /// Creates a field element, reducing `value` modulo the field prime.
            pub fn new(value: num_bigint::BigUint) -> Self {
                Self(value % &*$modulus)
            }

            pub fn zero() -> Self {
                Self(<num_bigint::BigUint as num_traits::Zero>::zero())
            }

            pub fn one() -> Self {
                Self(<num_bigint::BigUint as num_traits::One>::one())
            }

            pub fn from_u64(value: u64) -> Self {
                Self::new(num_bigint::BigUint::from(value))
            }

            /// The prime this field is defined over.
            pub fn modulus() -> &'static num_bigint::BigUint {
                &$modulus
            }

            /// Parses a hex string of up to 64 digits, with or without `0x` prefix.
            ///
            /// Values which are not already reduced are rejected.
            pub fn from_hex(hex_str: &str) -> Result<Self, crate::algebra::field::HexParseError> {
                let value = crate::algebra::field::parse_hex(hex_str)?;
                Self::try_from(value)
                    .map_err(|_| crate::algebra::field::HexParseError::Overflow)
            }

            /// Creates a field element from big-endian bytes, reducing modulo the prime.
            pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
                Self::new(num_bigint::BigUint::from_bytes_be(bytes))
            }

            pub fn as_biguint(&self) -> &num_bigint::BigUint {
                &self.0
            }

            pub fn into_biguint(self) -> num_bigint::BigUint {
                self.0
            }

            pub fn is_zero(&self) -> bool {
                num_traits::Zero::is_zero(&self.0)
            }

            /// Returns the big-endian representation, left padded to 32 bytes.
            pub fn to_be_bytes(&self) -> [u8; 32] {
                let raw = self.0.to_bytes_be();
                let mut bytes = [0u8; 32];
                bytes[32 - raw.len()..].copy_from_slice(&raw);
                bytes
            }

            /// Lowercase hex of exactly 64 digits, without prefix.
            pub fn to_hex(&self) -> String {
                format!("{:064x}", self.0)
            }

            pub fn double(&self) -> Self {
                self.add_ref(self)
            }

            pub fn square(&self) -> Self {
                self.mul_ref(self)
            }

            pub fn pow(&self, exponent: &num_bigint::BigUint) -> Self {
                Self(self.0.modpow(exponent, &$modulus))
            }

            /// Computes the multiplicative inverse using Fermat's little theorem.
            pub fn inverse(&self) -> Option<Self> {
                if self.is_zero() {
                    return None;
                }
                let exponent = &*$modulus - 2u32;
                Some(self.pow(&exponent))
            }

            fn add_ref(&self, rhs: &Self) -> Self {
                let sum = &self.0 + &rhs.0;
                if sum >= *$modulus {
                    Self(sum - &*$modulus)
                } else {
                    Self(sum)
                }
            }

            fn sub_ref(&self, rhs: &Self) -> Self {
                if self.0 >= rhs.0 {
                    Self(&self.0 - &rhs.0)
                } else {
                    Self(&*$modulus - &rhs.0 + &self.0)
                }
            }

            fn mul_ref(&self, rhs: &Self) -> Self {
                Self::new(&self.0 * &rhs.0)
            }
        }

        impl TryFrom<num_bigint::BigUint> for $type {
            type Error = crate::algebra::field::OverflowError;

            /// Succeeds only for values strictly less than the modulus.
            fn try_from(value: num_bigint::BigUint) -> Result<Self, Self::Error> {
                if value < *$modulus {
                    Ok(Self(value))
                } else {
                    Err(crate::algebra::field::OverflowError)
                }
            }
        }

        impl From<$type> for num_bigint::BigUint {
            fn from(value: $type) -> Self {
                value.0
            }
        }

        impl std::fmt::Debug for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}(0x{})", stringify!($type), self.to_hex())
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "0x{}", self.to_hex())
            }
        }

        impl std::ops::Neg for &$type {
            type Output = $type;
            fn neg(self) -> Self::Output {
                $type::zero().sub_ref(self)
            }
        }

        impl std::ops::Neg for $type {
            type Output = $type;
            fn neg(self) -> Self::Output {
                -&self
            }
        }

        crate::algebra::field::derive::derive_op!($type, Add, add, add_ref);
        crate::algebra::field::derive::derive_op!($type, Sub, sub, sub_ref);
        crate::algebra::field::derive::derive_op!($type, Mul, mul, mul_ref);
        crate::algebra::field::derive::derive_op_assign!($type, AddAssign, add_assign, add_ref);
        crate::algebra::field::derive::derive_op_assign!($type, SubAssign, sub_assign, sub_ref);
        crate::algebra::field::derive::derive_op_assign!($type, MulAssign, mul_assign, mul_ref);
    };
}
pub(crate) use prime_field;
