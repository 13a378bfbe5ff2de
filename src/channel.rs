//! Method channel boundary
//!
//! The host application reaches the derivation through a named method
//! call on [`CHANNEL_NAME`]. This module owns the contract of that call:
//! which method names exist, and how results and errors are reported.
//! Only two error codes ever cross the boundary; everything richer stays
//! inside [`DrmidError`].

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::DrmidError;
use crate::model::IdentityConfig;
use crate::ports::KeySystem;
use crate::use_cases::get_secure_hardware_id;

/// Channel the host registers its handler on
pub const CHANNEL_NAME: &str = "com.university.attendance/identity";

/// Derive the encoded hardware identifier; takes no arguments
pub const METHOD_GET_SECURE_HARDWARE_ID: &str = "getSecureHardwareId";

/// Message reported with [`ErrorCode::Unavailable`]
pub const UNAVAILABLE_MESSAGE: &str = "Could not generate Hardware ID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No identifier could be obtained on this device
    Unavailable,
    /// Any other failure
    Error,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Unavailable => "UNAVAILABLE",
            ErrorCode::Error => "ERROR",
        }
    }
}

impl From<&DrmidError> for ErrorCode {
    fn from(err: &DrmidError) -> Self {
        if err.is_unavailable() {
            ErrorCode::Unavailable
        } else {
            ErrorCode::Error
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    Success { result: String },
    Error { code: ErrorCode, message: String },
    NotImplemented,
}

impl MethodResponse {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error {
            code,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&DrmidError> for MethodResponse {
    fn from(err: &DrmidError) -> Self {
        match ErrorCode::from(err) {
            ErrorCode::Unavailable => Self::error(ErrorCode::Unavailable, UNAVAILABLE_MESSAGE),
            ErrorCode::Error => Self::error(ErrorCode::Error, err.diagnostic()),
        }
    }
}

/// Handler for calls on [`CHANNEL_NAME`]
pub struct IdentityChannel<K> {
    key_system: K,
    config: IdentityConfig,
}

impl<K: KeySystem> IdentityChannel<K> {
    pub fn new(key_system: K) -> Self {
        Self::with_config(key_system, IdentityConfig::default())
    }

    pub fn with_config(key_system: K, config: IdentityConfig) -> Self {
        Self { key_system, config }
    }

    pub fn key_system(&self) -> &K {
        &self.key_system
    }

    /// Dispatch one call
    ///
    /// Unknown methods are answered with [`MethodResponse::NotImplemented`]
    /// without touching the key system. A panic during derivation is
    /// reported as [`ErrorCode::Error`].
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        if call.method != METHOD_GET_SECURE_HARDWARE_ID {
            debug!("Method {} not implemented on {}", call.method, CHANNEL_NAME);
            return MethodResponse::NotImplemented;
        }

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            get_secure_hardware_id(&self.key_system, &self.config)
        }));

        match outcome {
            Ok(Ok(id)) => MethodResponse::Success {
                result: id.into_string(),
            },
            Ok(Err(e)) => {
                warn!("{} failed: {}", METHOD_GET_SECURE_HARDWARE_ID, e);
                MethodResponse::from(&e)
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("{} panicked: {}", METHOD_GET_SECURE_HARDWARE_ID, message);
                MethodResponse::error(ErrorCode::Error, message)
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected failure".to_string()
    }
}
