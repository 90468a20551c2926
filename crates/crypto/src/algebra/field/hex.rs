use num_bigint::BigUint;

/// Error returned when parsing a hex string into a field element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HexParseError {
    #[error("Empty hex string")]
    Empty,
    #[error("Invalid nibble found: 0x{0:x}")]
    InvalidNibble(u8),
    #[error("More than {max} digits found: {actual}")]
    InvalidLength { max: usize, actual: usize },
    #[error("Value exceeds the field modulus")]
    Overflow,
}

/// Parses up to 64 hex digits into an integer.
///
/// Accepts upper and lower case digits and an optional `0x` or `0X` prefix.
pub fn parse_hex(hex_str: &str) -> Result<BigUint, HexParseError> {
    let digits = strip_hex_prefix(hex_str);

    if digits.is_empty() {
        return Err(HexParseError::Empty);
    }
    if digits.len() > 64 {
        return Err(HexParseError::InvalidLength {
            max: 64,
            actual: digits.len(),
        });
    }
    if let Some(bad) = digits.bytes().find(|b| !b.is_ascii_hexdigit()) {
        return Err(HexParseError::InvalidNibble(bad));
    }

    // All digits were validated above.
    BigUint::parse_bytes(digits.as_bytes(), 16).ok_or(HexParseError::Empty)
}

/// Removes a leading `0x` or `0X`, if present.
pub fn strip_hex_prefix(hex_str: &str) -> &str {
    hex_str
        .strip_prefix("0x")
        .or_else(|| hex_str.strip_prefix("0X"))
        .unwrap_or(hex_str)
}
