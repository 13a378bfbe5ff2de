//! MediaDrm implementation of the key system ports
//!
//! This module drives `android.media.MediaDrm` through JNI. Each session
//! owns a global reference to one `MediaDrm` instance; every call attaches
//! the current thread to the JVM, so sessions may be used from the worker
//! thread the host dispatches requests on.

use std::sync::Arc;

use jni::errors::Error as JniError;
use jni::objects::{GlobalRef, JByteArray, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};
use tracing::debug;

use crate::error::{DrmidError, DrmidResult, KeySystemError, PlatformError};
use crate::model::{ApiLevel, KeySystemId, PropertyName, ReleaseProtocol};
use crate::ports::{KeySystem, KeySystemSession, PlatformInfo};

const MEDIA_DRM_CLASS: &str = "android/media/MediaDrm";
const UUID_CLASS: &str = "java/util/UUID";
const BUILD_VERSION_CLASS: &str = "android/os/Build$VERSION";

/// Key system backed by the platform's MediaDrm service
#[derive(Clone)]
pub struct MediaDrmKeySystem {
    vm: Arc<JavaVM>,
}

impl MediaDrmKeySystem {
    pub fn new(vm: Arc<JavaVM>) -> Self {
        Self { vm }
    }
}

fn attach(vm: &JavaVM) -> DrmidResult<jni::AttachGuard<'_>> {
    vm.attach_current_thread().map_err(|e| {
        DrmidError::Platform(PlatformError::Jvm {
            reason: format!("Failed to attach thread: {}", e),
        })
    })
}

/// Describe a failed JNI call, clearing any pending Java exception
fn describe_failure(env: &mut JNIEnv<'_>, err: JniError) -> String {
    if !matches!(err, JniError::JavaException) {
        return err.to_string();
    }

    let throwable = match env.exception_occurred() {
        Ok(throwable) => throwable,
        Err(e) => return e.to_string(),
    };
    // A pending exception blocks every further JNI call
    let _ = env.exception_clear();

    let text = env
        .call_method(&throwable, "toString", "()Ljava/lang/String;", &[])
        .and_then(|value| value.l())
        .and_then(|obj| env.get_string(&JString::from(obj)).map(String::from));

    match text {
        Ok(text) => text,
        Err(_) => {
            let _ = env.exception_clear();
            "Java exception".to_string()
        }
    }
}

impl PlatformInfo for MediaDrmKeySystem {
    fn api_level(&self) -> DrmidResult<ApiLevel> {
        let mut env = attach(&self.vm)?;

        let level = env
            .get_static_field(BUILD_VERSION_CLASS, "SDK_INT", "I")
            .and_then(|value| value.i());

        match level {
            Ok(level) if level > 0 => Ok(ApiLevel::new(level as u32)),
            Ok(level) => Err(PlatformError::ApiLevelUnavailable {
                reason: format!("SDK_INT is {}", level),
            }
            .into()),
            Err(e) => Err(PlatformError::ApiLevelUnavailable {
                reason: describe_failure(&mut env, e),
            }
            .into()),
        }
    }
}

impl KeySystem for MediaDrmKeySystem {
    type Session = MediaDrmSession;

    fn open_session(&self, id: &KeySystemId) -> DrmidResult<Self::Session> {
        let mut env = attach(&self.vm)?;
        let (msb, lsb) = id.as_signed_pair();

        let created = env
            .new_object(UUID_CLASS, "(JJ)V", &[JValue::Long(msb), JValue::Long(lsb)])
            .and_then(|uuid| {
                env.new_object(
                    MEDIA_DRM_CLASS,
                    "(Ljava/util/UUID;)V",
                    &[JValue::Object(&uuid)],
                )
            })
            .and_then(|drm| env.new_global_ref(drm));

        let drm = created.map_err(|e| KeySystemError::AcquisitionFailed {
            reason: describe_failure(&mut env, e),
        })?;

        debug!("MediaDrm instance created for {}", id);
        Ok(MediaDrmSession {
            vm: Arc::clone(&self.vm),
            drm,
            open: true,
        })
    }
}

/// One `android.media.MediaDrm` instance
pub struct MediaDrmSession {
    vm: Arc<JavaVM>,
    drm: GlobalRef,
    open: bool,
}

impl MediaDrmSession {
    fn end(&mut self, protocol: ReleaseProtocol) -> DrmidResult<()> {
        if !self.open {
            return Err(KeySystemError::SessionClosed.into());
        }
        self.open = false;

        let method = match protocol {
            ReleaseProtocol::Close => "close",
            ReleaseProtocol::Release => "release",
        };

        let mut env = attach(&self.vm)?;
        env.call_method(self.drm.as_obj(), method, "()V", &[])
            .map(|_| ())
            .map_err(|e| {
                KeySystemError::ReleaseFailed {
                    protocol,
                    reason: describe_failure(&mut env, e),
                }
                .into()
            })
    }
}

impl KeySystemSession for MediaDrmSession {
    fn property_byte_array(&mut self, name: &PropertyName) -> DrmidResult<Option<Vec<u8>>> {
        if !self.open {
            return Err(KeySystemError::SessionClosed.into());
        }

        let mut env = attach(&self.vm)?;

        let value = env.new_string(name.as_str()).and_then(|jname| {
            env.call_method(
                self.drm.as_obj(),
                "getPropertyByteArray",
                "(Ljava/lang/String;)[B",
                &[JValue::Object(&JObject::from(jname))],
            )
        });

        let bytes = value.and_then(|value| value.l()).and_then(|obj| {
            if obj.is_null() {
                return Ok(None);
            }
            env.convert_byte_array(&JByteArray::from(obj)).map(Some)
        });

        bytes.map_err(|e| {
            KeySystemError::PropertyReadFailed {
                property: name.to_string(),
                reason: describe_failure(&mut env, e),
            }
            .into()
        })
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
    use crate::ports::contract_tests::key_system_contract;

    // These run the shared key system contract against the device's MediaDrm
    // service. They need a test binary hosted in an app process whose
    // ndk-context is initialised, and are ignored unless --features hardware-tests is used.

    fn device_key_system() -> MediaDrmKeySystem {
        let ctx = ndk_context::android_context();
        let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }.expect("JavaVM not available");
        MediaDrmKeySystem::new(Arc::new(vm))
    }

    #[test]
    #[cfg_attr(not(feature = "hardware-tests"), ignore)] // Requires an Android device - enable with: --features hardware-tests
    fn test_api_level_reported() {
        key_system_contract::test_api_level_reported(device_key_system());
    }

    #[test]
    #[cfg_attr(not(feature = "hardware-tests"), ignore)] // Requires an Android device - enable with: --features hardware-tests
    fn test_open_widevine_session() {
        key_system_contract::test_open_widevine_session(device_key_system());
    }

    #[test]
    #[cfg_attr(not(feature = "hardware-tests"), ignore)] // Requires an Android device - enable with: --features hardware-tests
    fn test_open_unknown_key_system_fails() {
        key_system_contract::test_open_unknown_key_system_fails(device_key_system());
    }

    #[test]
    #[cfg_attr(not(feature = "hardware-tests"), ignore)] // Requires an Android device - enable with: --features hardware-tests
    fn test_unique_id_non_empty() {
        key_system_contract::test_unique_id_non_empty(device_key_system());
    }

    #[test]
    #[cfg_attr(not(feature = "hardware-tests"), ignore)] // Requires an Android device - enable with: --features hardware-tests
    fn test_teardown_twice_fails() {
        key_system_contract::test_teardown_twice_fails(device_key_system());
    }

    #[test]
    #[cfg_attr(not(feature = "hardware-tests"), ignore)] // Requires an Android device - enable with: --features hardware-tests
    fn test_read_after_teardown_fails() {
        key_system_contract::test_read_after_teardown_fails(device_key_system());
    }

    #[test]
    #[cfg_attr(not(feature = "hardware-tests"), ignore)] // Requires an Android device - enable with: --features hardware-tests
    fn test_identifier_stable_across_sessions() {
        key_system_contract::test_identifier_stable_across_sessions(device_key_system());
    }
}
