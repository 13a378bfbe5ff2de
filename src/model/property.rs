use std::fmt;

/// Name of a byte-array property exposed by a key system session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyName(&'static str);

impl PropertyName {
    /// Hardware-unique device identifier (`MediaDrm.PROPERTY_DEVICE_UNIQUE_ID`)
    pub const DEVICE_UNIQUE_ID: PropertyName = PropertyName("deviceUniqueId");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for PropertyName {
    fn default() -> Self {
        Self::DEVICE_UNIQUE_ID
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
