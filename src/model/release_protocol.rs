use std::fmt;

use super::ApiLevel;

/// Session teardown call supported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseProtocol {
    /// `close()`, API 28 and later
    Close,
    /// `release()`, deprecated since API 28
    Release,
}

impl ReleaseProtocol {
    pub fn for_api_level(level: ApiLevel) -> Self {
        if level.has_session_close() {
            Self::Close
        } else {
            Self::Release
        }
    }
}

impl fmt::Display for ReleaseProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseProtocol::Close => f.write_str("close"),
            ReleaseProtocol::Release => f.write_str("release"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_by_api_level() {
        assert_eq!(
            ReleaseProtocol::for_api_level(ApiLevel::new(23)),
            ReleaseProtocol::Release
        );
        assert_eq!(
            ReleaseProtocol::for_api_level(ApiLevel::new(27)),
            ReleaseProtocol::Release
        );
        assert_eq!(
            ReleaseProtocol::for_api_level(ApiLevel::P),
            ReleaseProtocol::Close
        );
        assert_eq!(
            ReleaseProtocol::for_api_level(ApiLevel::new(35)),
            ReleaseProtocol::Close
        );
    }
}
