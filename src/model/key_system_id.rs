//! Key system identifier
//!
//! DRM key systems are addressed by a 128-bit UUID. This type wraps the
//! UUID so the rest of the crate can't confuse it with other identifiers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// UUID of a DRM key system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySystemId(Uuid);

impl KeySystemId {
    /// Widevine (`edef8ba9-79d6-4ace-a3c8-27dcd51d21ed`)
    pub const WIDEVINE: KeySystemId =
        KeySystemId(Uuid::from_u128(0xedef8ba9_79d6_4ace_a3c8_27dcd51d21ed));

    pub const fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Most and least significant halves, in the layout `java.util.UUID(long, long)` expects
    pub fn as_signed_pair(&self) -> (i64, i64) {
        let (msb, lsb) = self.0.as_u64_pair();
        (msb as i64, lsb as i64)
    }
}

impl Default for KeySystemId {
    fn default() -> Self {
        Self::WIDEVINE
    }
}

impl fmt::Display for KeySystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for KeySystemId {
    type Err = KeySystemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| KeySystemIdError::InvalidUuid {
                reason: e.to_string(),
            })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeySystemIdError {
    #[error("Invalid key system UUID: {reason}")]
    InvalidUuid { reason: String },
}
