//! Encoded identifier
//!
//! The base64 text form of a [`Digest`]. This is the only value derived
//! from the hardware identifier that leaves the crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Digest;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedIdentifier(String);

impl EncodedIdentifier {
    /// Padded base64 length of a 32-byte digest
    pub const LENGTH: usize = 4 * Digest::LENGTH.div_ceil(3);

    /// Wrap encoder output; callers must pass canonical base64 of a digest
    pub(crate) fn from_encoded(text: String) -> Self {
        debug_assert_eq!(text.len(), Self::LENGTH);
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Recover the digest this identifier encodes
    pub fn to_digest(&self) -> Result<Digest, EncodingError> {
        crate::logic::decode(&self.0)
    }
}

impl FromStr for EncodedIdentifier {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::logic::decode(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for EncodedIdentifier {
    type Error = EncodingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        crate::logic::decode(&s)?;
        Ok(Self(s))
    }
}

impl From<EncodedIdentifier> for String {
    fn from(id: EncodedIdentifier) -> Self {
        id.0
    }
}

impl fmt::Display for EncodedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid base64: {reason}")]
    InvalidBase64 { reason: String },

    #[error("Decoded identifier must be exactly {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Base64 stream failed: {reason}")]
    Stream { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_constant() {
        assert_eq!(EncodedIdentifier::LENGTH, 44);
    }

    #[test]
    fn test_parse_valid() {
        let text = "A".repeat(43) + "=";
        let id: EncodedIdentifier = text.parse().unwrap();
        assert_eq!(id.to_digest().unwrap(), Digest::new([0u8; 32]));
    }

    #[test]
    fn test_parse_wrong_length() {
        let result = "AAAA".parse::<EncodedIdentifier>();
        assert_eq!(
            result.unwrap_err(),
            EncodingError::InvalidLength {
                expected: 32,
                actual: 3
            }
        );
    }

    #[test]
    fn test_parse_invalid_alphabet() {
        let text = "!".repeat(43) + "=";
        assert!(matches!(
            text.parse::<EncodedIdentifier>().unwrap_err(),
            EncodingError::InvalidBase64 { .. }
        ));
    }

    #[test]
    fn test_serde_as_plain_string() {
        let text = "A".repeat(43) + "=";
        let id: EncodedIdentifier = text.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", text));

        let back: EncodedIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<EncodedIdentifier>("\"AAAA\"").is_err());
    }
}
