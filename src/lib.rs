//! Stable device identifier derived from a hardware-backed DRM key system
//!
//! The raw unique id of the Widevine key system never leaves the crate;
//! callers get its SHA-256 digest as base64 text.

mod adapters;
pub mod api;
pub mod channel;
pub mod error;
mod logic;
pub mod model;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use error::{DrmidError, DrmidResult};
pub use model::{EncodedIdentifier, IdentityConfig, KeySystemId};

pub use adapters::{SessionLedger, SimulatedKeySystem, SimulatedSession};
#[cfg(target_os = "android")]
pub use adapters::{MediaDrmKeySystem, MediaDrmSession};

// Re-export public API
pub use api::get_secure_hardware_id_from;
#[cfg(target_os = "android")]
pub use api::{get_secure_hardware_id, get_secure_hardware_id_with_config};
pub use logic::{decode, encode, hash_identifier, sha256, Base64Codepath};
