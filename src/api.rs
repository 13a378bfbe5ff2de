use crate::error::DrmidResult;
use crate::use_cases::get_secure_hardware_id as get_secure_hardware_id_use_case;

pub use crate::model::*;

#[cfg(target_os = "android")]
pub use self::android::*;

/// Derive the identifier from `key_system` with the default configuration
pub fn get_secure_hardware_id_from<K>(key_system: &K) -> DrmidResult<EncodedIdentifier>
where
    K: crate::ports::KeySystem,
{
    get_secure_hardware_id_use_case(key_system, &IdentityConfig::default())
}

#[cfg(target_os = "android")]
mod android {
    use std::sync::Arc;

    use jni::JavaVM;

    use super::*;
    use crate::adapters::MediaDrmKeySystem;
    use crate::channel::{IdentityChannel, MethodCall, MethodResponse};

    pub fn get_secure_hardware_id(vm: Arc<JavaVM>) -> DrmidResult<EncodedIdentifier> {
        get_secure_hardware_id_with_config(vm, &IdentityConfig::default())
    }

    pub fn get_secure_hardware_id_with_config(
        vm: Arc<JavaVM>,
        config: &IdentityConfig,
    ) -> DrmidResult<EncodedIdentifier> {
        let key_system = MediaDrmKeySystem::new(vm);
        get_secure_hardware_id_use_case(&key_system, config)
    }

    /// Answer a channel call against the device's MediaDrm service
    pub fn handle_method_call(vm: Arc<JavaVM>, call: &MethodCall) -> MethodResponse {
        IdentityChannel::new(MediaDrmKeySystem::new(vm)).handle(call)
    }
}
