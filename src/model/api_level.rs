//! Platform capability tier
//!
//! The Android SDK level decides which base64 encoder and which session
//! teardown call are available.

use std::fmt;

/// Android API level (`Build.VERSION.SDK_INT`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiLevel(u32);

impl ApiLevel {
    /// Android 8.0, first level with `java.util.Base64`
    pub const O: ApiLevel = ApiLevel(26);

    /// Android 9, first level where `MediaDrm` is `AutoCloseable`
    pub const P: ApiLevel = ApiLevel(28);

    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn has_standard_base64(self) -> bool {
        self >= Self::O
    }

    pub fn has_session_close(self) -> bool {
        self >= Self::P
    }
}

impl From<u32> for ApiLevel {
    fn from(level: u32) -> Self {
        Self(level)
    }
}

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {}", self.0)
    }
}
