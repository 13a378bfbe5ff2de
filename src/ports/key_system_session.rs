//! KeySystemSession trait - an open session with a key system

use crate::error::DrmidResult;
use crate::model::PropertyName;

/// An open key system session
///
/// Exactly one of [`close`](Self::close) or [`release`](Self::release) is
/// called per session, chosen by the platform's API level. Callers go
/// through [`crate::use_cases::ScopedSession`] rather than calling either
/// directly.
pub trait KeySystemSession {
    /// Read a byte-array property
    ///
    /// # Returns
    ///
    /// `None` when the platform reports a null value
    ///
    /// # Errors
    ///
    /// Returns `DrmidError::KeySystem(KeySystemError::PropertyReadFailed)` if
    /// the platform call raised
    fn property_byte_array(&mut self, name: &PropertyName) -> DrmidResult<Option<Vec<u8>>>;

    /// Tear the session down with `close()` (API 28+)
    fn close(&mut self) -> DrmidResult<()>;

    /// Tear the session down with `release()` (before API 28)
    fn release(&mut self) -> DrmidResult<()>;
}
