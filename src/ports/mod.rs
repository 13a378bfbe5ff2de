//! Ports (traits) for key system access
//!
//! These traits define the capabilities the derivation needs from the
//! platform. They represent ports in hexagonal architecture - the use cases
//! depend on these abstractions, not on MediaDrm or JNI directly.

mod key_system;
mod key_system_session;
mod platform_info;

pub use key_system::KeySystem;
pub use key_system_session::KeySystemSession;
pub use platform_info::PlatformInfo;
