//! Error types for drmid
//!
//! This module defines the error hierarchy for identifier derivation.
//! Errors are organized hierarchically and use thiserror for implementation.
//! At the channel boundary every variant collapses into one of two codes,
//! see [`crate::channel::ErrorCode`].

use thiserror::Error;

use crate::model::ReleaseProtocol;

/// Result type alias for drmid operations
pub type DrmidResult<T> = Result<T, DrmidError>;

/// Top-level error type for all drmid operations
#[derive(Error, Debug)]
pub enum DrmidError {
    /// Key system session errors
    #[error("Key system error: {0}")]
    KeySystem(#[from] KeySystemError),

    /// Host platform errors (capability query, JNI)
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Domain validation errors
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),
}

/// Errors raised by a key system or one of its sessions
#[derive(Error, Debug)]
pub enum KeySystemError {
    /// The key system could not be instantiated (unsupported or not provisioned)
    #[error("Failed to open key system session: {reason}")]
    AcquisitionFailed { reason: String },

    /// The session is open but the property holds no identifier
    #[error("Property {property} is unavailable")]
    PropertyUnavailable { property: String },

    /// Reading the property raised an error
    #[error("Failed to read property {property}: {reason}")]
    PropertyReadFailed { property: String, reason: String },

    /// Session teardown failed; logged, never returned from a derivation
    #[error("Session {protocol} failed: {reason}")]
    ReleaseFailed {
        protocol: ReleaseProtocol,
        reason: String,
    },

    /// The session was already torn down
    #[error("Session is closed")]
    SessionClosed,
}

/// Errors raised by the host platform itself
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Platform capability tier could not be determined
    #[error("Failed to query API level: {reason}")]
    ApiLevelUnavailable { reason: String },

    /// A JVM call failed outside of a key system operation
    #[error("JVM call failed: {reason}")]
    Jvm { reason: String },
}

/// Domain validation errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Key system id error
    #[error("Key system id error: {0}")]
    KeySystemId(#[from] crate::model::KeySystemIdError),

    /// Encoded identifier error
    #[error("Encoding error: {0}")]
    Encoding(#[from] crate::model::EncodingError),
}

impl DrmidError {
    /// Whether the failure means "no identifier on this device" rather than a fault
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DrmidError::KeySystem(KeySystemError::PropertyUnavailable { .. })
        )
    }

    /// Innermost failure text, without the category prefixes of `Display`
    ///
    /// For platform failures this is the exception text reported by the JVM.
    pub fn diagnostic(&self) -> String {
        match self {
            DrmidError::KeySystem(KeySystemError::AcquisitionFailed { reason })
            | DrmidError::KeySystem(KeySystemError::PropertyReadFailed { reason, .. })
            | DrmidError::KeySystem(KeySystemError::ReleaseFailed { reason, .. })
            | DrmidError::Platform(PlatformError::ApiLevelUnavailable { reason })
            | DrmidError::Platform(PlatformError::Jvm { reason }) => reason.clone(),
            DrmidError::KeySystem(err) => err.to_string(),
            DrmidError::Domain(DomainError::KeySystemId(err)) => err.to_string(),
            DrmidError::Domain(DomainError::Encoding(err)) => err.to_string(),
        }
    }
}

/// Convert model errors to DrmidError (via DomainError)
impl From<crate::model::KeySystemIdError> for DrmidError {
    fn from(err: crate::model::KeySystemIdError) -> Self {
        DrmidError::Domain(DomainError::KeySystemId(err))
    }
}

impl From<crate::model::EncodingError> for DrmidError {
    fn from(err: crate::model::EncodingError) -> Self {
        DrmidError::Domain(DomainError::Encoding(err))
    }
}
