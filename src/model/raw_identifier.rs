//! Raw hardware identifier
//!
//! The bytes read from the key system's unique-id property. They are only
//! ever handed to the hash function; `Debug` is redacted and the buffer is
//! wiped when the value is dropped.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

pub struct RawIdentifier(Zeroizing<Vec<u8>>);

impl RawIdentifier {
    /// Wrap property bytes; an empty value is not an identifier
    pub fn new(bytes: Vec<u8>) -> Result<Self, RawIdentifierError> {
        let bytes = Zeroizing::new(bytes);
        if bytes.is_empty() {
            return Err(RawIdentifierError::Empty);
        }
        Ok(Self(bytes))
    }

    /// Interpret a nullable property value
    pub fn from_property(value: Option<Vec<u8>>) -> Result<Self, RawIdentifierError> {
        match value {
            Some(bytes) => Self::new(bytes),
            None => Err(RawIdentifierError::Null),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for RawIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawIdentifier([REDACTED; {} bytes])", self.0.len())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawIdentifierError {
    #[error("property value is null")]
    Null,

    #[error("property value is empty")]
    Empty,
}
