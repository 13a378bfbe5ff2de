//! Secure hardware id use case
//!
//! This use case derives the device fingerprint from a key system:
//! it opens a session, reads the raw unique id, tears the session down,
//! then hashes and encodes the id.

use tracing::{debug, info};

use super::ScopedSession;
use crate::error::{DrmidResult, KeySystemError};
use crate::logic::{hash_identifier, Base64Codepath};
use crate::model::{
    EncodedIdentifier, IdentityConfig, PropertyName, RawIdentifier, ReleaseProtocol,
};
use crate::ports::{KeySystem, KeySystemSession};

/// Derive the encoded hardware identifier
///
/// This function orchestrates the complete derivation:
/// 1. Query the platform API level once, which fixes the teardown protocol
///    and the base64 codepath
/// 2. Open a session with the configured key system
/// 3. Read the unique-id property
/// 4. Tear the session down (on every path, including failures)
/// 5. SHA-256 the raw id and base64 encode the digest
///
/// Nothing is cached; every call opens its own session.
///
/// # Errors
///
/// Returns errors if:
/// - The API level can't be determined
/// - The key system can't be opened (`KeySystemError::AcquisitionFailed`)
/// - The property is null or empty (`KeySystemError::PropertyUnavailable`)
/// - Reading the property fails (`KeySystemError::PropertyReadFailed`)
///
/// Teardown failures are logged and never returned.
pub fn get_secure_hardware_id<K>(
    key_system: &K,
    config: &IdentityConfig,
) -> DrmidResult<EncodedIdentifier>
where
    K: KeySystem,
{
    let api_level = key_system.api_level()?;
    let protocol = ReleaseProtocol::for_api_level(api_level);
    let codepath = Base64Codepath::for_api_level(api_level);
    debug!(
        "Platform {}: teardown via {}, {:?} base64",
        api_level, protocol, codepath
    );

    let mut session = ScopedSession::open(key_system, &config.key_system, protocol)?;
    let raw = read_unique_id(session.session_mut(), &config.property);
    session.finish();
    let raw = raw?;

    let digest = hash_identifier(&raw);
    drop(raw);

    info!("Derived hardware identifier from key system {}", config.key_system);
    Ok(codepath.encode(&digest)?)
}

/// Read the raw unique id from an open session
///
/// # Errors
///
/// A null or empty property is reported as `KeySystemError::PropertyUnavailable`,
/// distinct from a failing read
pub fn read_unique_id<S>(session: &mut S, property: &PropertyName) -> DrmidResult<RawIdentifier>
where
    S: KeySystemSession,
{
    let value = session.property_byte_array(property)?;

    let raw = RawIdentifier::from_property(value).map_err(|e| {
        debug!("Property {} has no identifier: {}", property, e);
        KeySystemError::PropertyUnavailable {
            property: property.to_string(),
        }
    })?;

    debug!(
        "Read {} byte identifier from {}",
        raw.as_bytes().len(),
        property
    );
    Ok(raw)
}
