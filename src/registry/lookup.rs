//! Session lookup
//!
//! Resolution, membership tests and snapshots of the live session set.

use std::sync::Arc;

use crate::error::{GdbError, Result};
use crate::transport::ProcessLauncher;
use crate::types::identifiers::SessionId;

use super::core::SessionRegistry;
use super::session::GdbSession;

impl<L: ProcessLauncher> SessionRegistry<L> {
    /// Look up a live session
    ///
    /// Every command path goes through here; an identifier absent from the
    /// map is unknown even if it was valid once.
    ///
    /// # Errors
    /// Returns `GdbError::SessionNotFound` if no session has this identifier
    pub fn resolve(&self, session_id: &str) -> Result<Arc<GdbSession<L::Process>>> {
        self.sessions
            .lock()
            .get(session_id)
            .cloned()
            .ok_or_else(|| GdbError::session_not_found(session_id))
    }

    /// Whether a session with this identifier is live
    #[must_use]
    pub fn exists(&self, session_id: &str) -> bool {
        self.sessions.lock().contains_key(session_id)
    }

    /// Snapshot of live session identifiers, oldest first
    #[must_use]
    pub fn list(&self) -> Vec<SessionId> {
        let mut sessions: Vec<_> = self
            .sessions
            .lock()
            .values()
            .map(|session| (session.created_at(), session.id().clone()))
            .collect();

        sessions.sort();
        sessions.into_iter().map(|(_, id)| id).collect()
    }
}
