use sha3::{Digest, Keccak256};

/// Computes the Keccak-256 digest of `data`.
///
/// This is the original Keccak padding used by Ethereum and the StarkEx
/// contracts, not the standardised SHA3-256.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(
            hex::encode(keccak256(&[])),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn function_selector() {
        // transfer(address,uint256)
        let digest = keccak256(b"transfer(address,uint256)");
        assert_eq!(digest[..4], [0xa9, 0x05, 0x9c, 0xbb]);
    }
}
