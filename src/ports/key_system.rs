//! KeySystem trait - capability to open key system sessions

use super::{KeySystemSession, PlatformInfo};
use crate::error::DrmidResult;
use crate::model::KeySystemId;

/// Capability to open sessions with a hardware-backed key system
///
/// One session is opened per derivation and torn down before the
/// derivation returns. Implementations must not hand out shared or cached
/// sessions.
pub trait KeySystem: PlatformInfo {
    /// The type of session handle returned
    type Session: KeySystemSession;

    /// Open a session with the key system identified by `id`
    ///
    /// # Errors
    ///
    /// Returns `DrmidError::KeySystem(KeySystemError::AcquisitionFailed)` if
    /// the key system is unsupported or not provisioned on this device
    fn open_session(&self, id: &KeySystemId) -> DrmidResult<Self::Session>;
}
