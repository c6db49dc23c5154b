//! Core session registry structure and lifecycle management
//!
//! Provides the main `SessionRegistry` struct with construction and shutdown.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::transport::{ProcessLauncher, SubprocessLauncher};
use crate::types::identifiers::SessionId;
use crate::types::options::GdbOptions;

use super::session::GdbSession;

/// Session map shared by every registry operation
pub(super) type SessionMap<P> = HashMap<SessionId, Arc<GdbSession<P>>>;

// ============================================================================
// SESSION REGISTRY CORE
// ============================================================================

/// Registry of live GDB sessions
///
/// The `SessionRegistry` is the authority on which sessions exist:
/// - Creation spawns a debugger through the injected `ProcessLauncher`
/// - Every command path resolves its session here first
/// - Termination removes the entry before the process is stopped
/// - A session whose debugger exits on its own is removed by its watcher
///
/// The map lock is only held for inserts, removals and snapshots, never
/// while a debugger command runs.
pub struct SessionRegistry<L: ProcessLauncher = SubprocessLauncher> {
    pub(super) launcher: L,
    pub(super) options: GdbOptions,
    pub(super) sessions: Arc<Mutex<SessionMap<L::Process>>>,
}

impl SessionRegistry<SubprocessLauncher> {
    /// Create a registry launching real GDB subprocesses configured by `options`
    #[must_use]
    pub fn with_options(options: GdbOptions) -> Self {
        Self::new(SubprocessLauncher::new(options.clone()), options)
    }
}

impl Default for SessionRegistry<SubprocessLauncher> {
    fn default() -> Self {
        Self::with_options(GdbOptions::default())
    }
}

impl<L: ProcessLauncher> SessionRegistry<L> {
    /// Create a registry using a custom launcher
    ///
    /// # Arguments
    /// * `launcher` - Spawns debugger processes
    /// * `options` - Default executable and interpreter arguments for new sessions
    #[must_use]
    pub fn new(launcher: L, options: GdbOptions) -> Self {
        Self {
            launcher,
            options,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Options new sessions are created with
    #[must_use]
    pub fn options(&self) -> &GdbOptions {
        &self.options
    }

    /// Number of live sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Whether no session is live
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    /// Gracefully shut down the registry
    ///
    /// Terminates every live session. Should be called before the server
    /// exits so no debugger process outlives it.
    pub async fn shutdown(&self) {
        log::info!("Shutting down GDB session registry...");

        let session_ids = self.list();

        for session_id in session_ids {
            log::debug!("Terminating session: {session_id}");
            if !self.terminate(session_id.as_str()).await {
                log::warn!("Session {session_id} did not terminate cleanly");
            }
        }

        log::info!("GDB session registry shutdown complete");
    }
}
