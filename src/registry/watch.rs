//! Crash detection
//!
//! Every session gets a background task that waits for the session to end.
//! If its debugger went away on its own, the entry is removed and the
//! process reaped; an explicit terminate has already removed it.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::transport::DebuggerTransport;

use super::core::SessionMap;
use super::session::GdbSession;

/// Spawn the exit watcher for `session`
///
/// Only removes the entry if it still maps to this very session.
pub(super) fn spawn_exit_watcher<P: DebuggerTransport>(
    sessions: Arc<Mutex<SessionMap<P>>>,
    session: Arc<GdbSession<P>>,
) {
    tokio::spawn(async move {
        session.ended().await;

        let removed = {
            let mut sessions = sessions.lock();
            let id = session.id().as_str();
            let current = sessions
                .get(id)
                .is_some_and(|entry| Arc::ptr_eq(entry, &session));
            if current { sessions.remove(id) } else { None }
        };
        if removed.is_none() {
            return;
        }

        log::warn!("GDB session {} exited unexpectedly, removing it", session.id());
        if let Err(e) = session.close().await {
            log::warn!("Failed to clean up GDB session {}: {e}", session.id());
        }
    });
}
