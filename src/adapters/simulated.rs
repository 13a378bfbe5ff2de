//! Simulated key system
//!
//! An in-memory stand-in for a DRM key system. It backs the CLI on hosts
//! without MediaDrm and the unit tests. Failures can be injected per
//! operation, and every open and teardown is counted so callers can check
//! that each session is released exactly once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::error::{DrmidError, DrmidResult, KeySystemError};
use crate::model::{ApiLevel, KeySystemId, PropertyName, ReleaseProtocol};
use crate::ports::{KeySystem, KeySystemSession, PlatformInfo};

/// Counts of session lifecycle events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionLedger {
    pub opened: usize,
    pub closed: usize,
    pub released: usize,
}

#[derive(Debug, Default)]
struct Counters {
    opened: AtomicUsize,
    closed: AtomicUsize,
    released: AtomicUsize,
}

#[derive(Debug, Clone)]
pub struct SimulatedKeySystem {
    key_system: KeySystemId,
    api_level: ApiLevel,
    unique_id: Option<Vec<u8>>,
    open_failure: Option<String>,
    read_failure: Option<String>,
    teardown_failure: Option<String>,
    counters: Arc<Counters>,
}

impl SimulatedKeySystem {
    /// Default API level of a simulated device
    pub const DEFAULT_API_LEVEL: ApiLevel = ApiLevel::new(34);

    /// Widevine device whose unique-id property holds `unique_id`
    pub fn new(unique_id: impl Into<Vec<u8>>) -> Self {
        Self {
            key_system: KeySystemId::WIDEVINE,
            api_level: Self::DEFAULT_API_LEVEL,
            unique_id: Some(unique_id.into()),
            open_failure: None,
            read_failure: None,
            teardown_failure: None,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Widevine device whose unique-id property is null
    pub fn without_unique_id() -> Self {
        Self {
            unique_id: None,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_api_level(mut self, api_level: ApiLevel) -> Self {
        self.api_level = api_level;
        self
    }

    /// Serve `key_system` instead of Widevine
    pub fn with_key_system(mut self, key_system: KeySystemId) -> Self {
        self.key_system = key_system;
        self
    }

    /// Make `open_session` fail, as on an unprovisioned device
    pub fn failing_open(mut self, reason: impl Into<String>) -> Self {
        self.open_failure = Some(reason.into());
        self
    }

    /// Make property reads fail
    pub fn failing_read(mut self, reason: impl Into<String>) -> Self {
        self.read_failure = Some(reason.into());
        self
    }

    /// Make `close` and `release` fail (the attempt is still counted)
    pub fn failing_teardown(mut self, reason: impl Into<String>) -> Self {
        self.teardown_failure = Some(reason.into());
        self
    }

    /// Snapshot of lifecycle counts across all sessions opened so far
    pub fn ledger(&self) -> SessionLedger {
        SessionLedger {
            opened: self.counters.opened.load(Ordering::SeqCst),
            closed: self.counters.closed.load(Ordering::SeqCst),
            released: self.counters.released.load(Ordering::SeqCst),
        }
    }
}

impl PlatformInfo for SimulatedKeySystem {
    fn api_level(&self) -> DrmidResult<ApiLevel> {
        Ok(self.api_level)
    }
}

impl KeySystem for SimulatedKeySystem {
    type Session = SimulatedSession;

    fn open_session(&self, id: &KeySystemId) -> DrmidResult<Self::Session> {
        if *id != self.key_system {
            return Err(KeySystemError::AcquisitionFailed {
                reason: format!("UnsupportedSchemeException: {} not supported", id),
            }
            .into());
        }

        if let Some(reason) = &self.open_failure {
            return Err(KeySystemError::AcquisitionFailed {
                reason: reason.clone(),
            }
            .into());
        }

        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(SimulatedSession {
            unique_id: self.unique_id.clone(),
            read_failure: self.read_failure.clone(),
            teardown_failure: self.teardown_failure.clone(),
            counters: Arc::clone(&self.counters),
            open: true,
        })
    }
}

#[derive(Debug)]
pub struct SimulatedSession {
    unique_id: Option<Vec<u8>>,
    read_failure: Option<String>,
    teardown_failure: Option<String>,
    counters: Arc<Counters>,
    open: bool,
}

impl SimulatedSession {
    fn end(&mut self, protocol: ReleaseProtocol) -> DrmidResult<()> {
        if !self.open {
            return Err(KeySystemError::SessionClosed.into());
        }
        self.open = false;

        let counter = match protocol {
            ReleaseProtocol::Close => &self.counters.closed,
            ReleaseProtocol::Release => &self.counters.released,
        };
        counter.fetch_add(1, Ordering::SeqCst);
        debug!("Simulated session ended via {}", protocol);

        match &self.teardown_failure {
            Some(reason) => Err(DrmidError::KeySystem(KeySystemError::ReleaseFailed {
                protocol,
                reason: reason.clone(),
            })),
            None => Ok(()),
        }
    }
}

impl KeySystemSession for SimulatedSession {
    fn property_byte_array(&mut self, name: &PropertyName) -> DrmidResult<Option<Vec<u8>>> {
        if !self.open {
            return Err(KeySystemError::SessionClosed.into());
        }

        if let Some(reason) = &self.read_failure {
            return Err(KeySystemError::PropertyReadFailed {
                property: name.to_string(),
                reason: reason.clone(),
            }
            .into());
        }

        if *name != PropertyName::DEVICE_UNIQUE_ID {
            return Ok(None);
        }

        Ok(self.unique_id.clone())
    }

    fn close(&mut self) -> DrmidResult<()> {
        self.end(ReleaseProtocol::Close)
    }

    fn release(&mut self) -> DrmidResult<()> {
        self.end(ReleaseProtocol::Release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_tests_for;
    use crate::ports::contract_tests::key_system_contract;

    contract_tests_for!(
        simulated_modern_contract,
        make = || SimulatedKeySystem::new(vec![0x42; 32]),
        tests = {
            test_api_level_reported => key_system_contract::test_api_level_reported,
            test_open_widevine_session => key_system_contract::test_open_widevine_session,
            test_open_unknown_key_system_fails => key_system_contract::test_open_unknown_key_system_fails,
            test_unique_id_non_empty => key_system_contract::test_unique_id_non_empty,
            test_teardown_twice_fails => key_system_contract::test_teardown_twice_fails,
            test_read_after_teardown_fails => key_system_contract::test_read_after_teardown_fails,
            test_identifier_stable_across_sessions => key_system_contract::test_identifier_stable_across_sessions,
        }
    );

    contract_tests_for!(
        simulated_legacy_contract,
        make = || SimulatedKeySystem::new(vec![0x42; 32]).with_api_level(ApiLevel::new(24)),
        tests = {
            test_api_level_reported => key_system_contract::test_api_level_reported,
            test_teardown_twice_fails => key_system_contract::test_teardown_twice_fails,
            test_read_after_teardown_fails => key_system_contract::test_read_after_teardown_fails,
            test_identifier_stable_across_sessions => key_system_contract::test_identifier_stable_across_sessions,
        }
    );

    #[test]
    fn test_unknown_property_is_null() {
        let key_system = SimulatedKeySystem::new(vec![1, 2, 3]);
        let mut session = key_system.open_session(&KeySystemId::WIDEVINE).unwrap();

        let value = session
            .property_byte_array(&PropertyName::new("vendor"))
            .unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_ledger_counts_each_protocol() {
        let key_system = SimulatedKeySystem::new(vec![1, 2, 3]);

        key_system
            .open_session(&KeySystemId::WIDEVINE)
            .unwrap()
            .close()
            .unwrap();
        key_system
            .open_session(&KeySystemId::WIDEVINE)
            .unwrap()
            .release()
            .unwrap();

        assert_eq!(
            key_system.ledger(),
            SessionLedger {
                opened: 2,
                closed: 1,
                released: 1
            }
        );
    }

    #[test]
    fn test_failing_teardown_is_counted() {
        let key_system = SimulatedKeySystem::new(vec![1, 2, 3]).failing_teardown("busy");
        let mut session = key_system.open_session(&KeySystemId::WIDEVINE).unwrap();

        let err = session.close().unwrap_err();
        assert!(matches!(
            err,
            DrmidError::KeySystem(KeySystemError::ReleaseFailed {
                protocol: ReleaseProtocol::Close,
                ..
            })
        ));
        assert_eq!(key_system.ledger().closed, 1);
    }

    #[test]
    fn test_custom_key_system() {
        let clearkey: KeySystemId = "e2719d58-a985-b3c9-781a-b030af78d30e".parse().unwrap();
        let key_system = SimulatedKeySystem::new(vec![1, 2, 3]).with_key_system(clearkey);

        assert!(key_system.open_session(&clearkey).is_ok());
        assert!(key_system.open_session(&KeySystemId::WIDEVINE).is_err());
    }
}
