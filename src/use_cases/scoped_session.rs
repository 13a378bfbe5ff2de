//! Scoped key system session
//!
//! Wraps an open session so that it is torn down exactly once, on every
//! exit path: explicit [`ScopedSession::teardown`], early return, `?`, or
//! unwinding. Teardown failures are logged and otherwise ignored.

use tracing::{debug, warn};

use crate::error::DrmidResult;
use crate::model::{KeySystemId, ReleaseProtocol};
use crate::ports::{KeySystem, KeySystemSession};

type Teardown<S> = fn(&mut S) -> DrmidResult<()>;

/// Teardown call for `protocol`
fn teardown_for<S: KeySystemSession>(protocol: ReleaseProtocol) -> Teardown<S> {
    match protocol {
        ReleaseProtocol::Close => <S as KeySystemSession>::close,
        ReleaseProtocol::Release => <S as KeySystemSession>::release,
    }
}

pub struct ScopedSession<S: KeySystemSession> {
    session: S,
    protocol: ReleaseProtocol,
    teardown: Teardown<S>,
    torn_down: bool,
}

impl<S: KeySystemSession> ScopedSession<S> {
    /// Take ownership of an already opened session
    pub fn new(session: S, protocol: ReleaseProtocol) -> Self {
        Self {
            session,
            protocol,
            teardown: teardown_for::<S>(protocol),
            torn_down: false,
        }
    }

    /// Open a session on `key_system` and scope it
    pub fn open<K>(
        key_system: &K,
        id: &KeySystemId,
        protocol: ReleaseProtocol,
    ) -> DrmidResult<Self>
    where
        K: KeySystem<Session = S>,
    {
        let session = key_system.open_session(id)?;
        debug!("Opened session with key system {}", id);
        Ok(Self::new(session, protocol))
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    /// Tear the session down now
    ///
    /// Only the first call reaches the session; later calls, and the drop
    /// that follows, do nothing.
    pub fn teardown(&mut self) -> DrmidResult<()> {
        if self.torn_down {
            return Ok(());
        }
        self.torn_down = true;
        (self.teardown)(&mut self.session)?;
        debug!("Session torn down with {}", self.protocol);
        Ok(())
    }

    /// Tear the session down, logging instead of returning a failure
    pub fn finish(mut self) {
        self.teardown_logged();
    }

    fn teardown_logged(&mut self) {
        if let Err(e) = self.teardown() {
            warn!("Ignoring session teardown failure: {}", e);
        }
    }
}

impl<S: KeySystemSession> Drop for ScopedSession<S> {
    fn drop(&mut self) {
        self.teardown_logged();
    }
}
