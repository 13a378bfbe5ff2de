//! Use cases (orchestration)
//!
//! This module contains use cases that orchestrate operations across ports.
//! Use cases coordinate between adapters and logic to fulfill business requirements.

mod get_secure_hardware_id;
mod scoped_session;

pub use get_secure_hardware_id::{get_secure_hardware_id, read_unique_id};
pub use scoped_session::ScopedSession;
