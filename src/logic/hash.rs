use sha2::{Digest as _, Sha256};

use crate::model::{Digest, RawIdentifier};

/// SHA-256 of `bytes`
pub fn sha256(bytes: &[u8]) -> Digest {
    let output: [u8; Digest::LENGTH] = Sha256::digest(bytes).into();
    Digest::new(output)
}

/// Hash a raw hardware identifier; the raw bytes go no further than this
pub fn hash_identifier(raw: &RawIdentifier) -> Digest {
    sha256(raw.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty_input() {
        assert_eq!(
            sha256(&[]).to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_sixteen_zero_bytes() {
        assert_eq!(
            sha256(&[0u8; 16]).to_hex(),
            "374708fff7719dd5979ec875d56cd2286f6d3cf7ec317a3b25632aab28ec37bb"
        );
    }

    #[test]
    fn test_sha256_deterministic() {
        let data = b"widevine device unique id";
        assert_eq!(sha256(data), sha256(data));
        assert_ne!(sha256(data), sha256(b"another device"));
    }

    #[test]
    fn test_hash_identifier_matches_sha256() {
        let raw = RawIdentifier::new(vec![7u8; 32]).unwrap();
        assert_eq!(hash_identifier(&raw), sha256(&[7u8; 32]));
    }
}
