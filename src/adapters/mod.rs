//! Adapters - concrete implementations of ports (traits)

#[cfg(target_os = "android")]
mod media_drm;
mod simulated;

#[cfg(target_os = "android")]
pub use media_drm::{MediaDrmKeySystem, MediaDrmSession};
pub use simulated::{SessionLedger, SimulatedKeySystem, SimulatedSession};
