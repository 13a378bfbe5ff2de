use super::{KeySystemId, PropertyName};

/// Which key system to open and which property to read from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Key system to open a session with
    pub key_system: KeySystemId,
    /// Byte-array property holding the hardware-unique identifier
    pub property: PropertyName,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            key_system: KeySystemId::WIDEVINE,
            property: PropertyName::DEVICE_UNIQUE_ID,
        }
    }
}
