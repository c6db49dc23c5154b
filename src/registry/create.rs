//! Session creation
//!
//! Spawns a debugger process and registers it under a fresh identifier.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::transport::ProcessLauncher;
use crate::types::identifiers::SessionId;

use super::core::SessionRegistry;
use super::session::GdbSession;
use super::watch::spawn_exit_watcher;

impl<L: ProcessLauncher> SessionRegistry<L> {
    /// Start a new GDB session
    ///
    /// # Arguments
    /// * `gdb_path` - Debugger executable; `None` uses the configured default
    ///
    /// # Errors
    /// Returns `GdbError::Spawn` if the debugger cannot be started. No entry
    /// is registered in that case.
    pub async fn create(&self, gdb_path: Option<&Path>) -> Result<SessionId> {
        let executable = gdb_path.unwrap_or(self.options.gdb_path.as_path());

        let process = match self
            .launcher
            .spawn(executable, &self.options.interpreter_args)
            .await
        {
            Ok(process) => process,
            Err(e) => {
                log::error!("Failed to start GDB session: {e}");
                return Err(e);
            }
        };

        let session_id = SessionId::generate();
        let session = Arc::new(GdbSession::new(session_id.clone(), process));
        self.sessions
            .lock()
            .insert(session_id.clone(), Arc::clone(&session));
        spawn_exit_watcher(Arc::clone(&self.sessions), session);

        log::info!("Started GDB session: {session_id}");
        Ok(session_id)
    }
}
