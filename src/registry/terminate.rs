//! Session termination

use crate::transport::ProcessLauncher;

use super::core::SessionRegistry;

impl<L: ProcessLauncher> SessionRegistry<L> {
    /// Terminate a GDB session
    ///
    /// The entry is removed before the process is asked to exit, so the
    /// session is unknown to every other caller from this point on. Commands
    /// queued on or running against the session fail with `SessionNotFound`.
    ///
    /// Returns `false` if the session did not exist, or if the process could
    /// not be stopped cleanly (the entry is removed either way).
    pub async fn terminate(&self, session_id: &str) -> bool {
        let removed = self.sessions.lock().remove(session_id);
        let Some(session) = removed else {
            return false;
        };

        match session.close().await {
            Ok(()) => {
                log::info!("Terminated GDB session: {session_id}");
                true
            }
            Err(e) => {
                log::warn!("Failed to terminate GDB session {session_id}: {e}");
                false
            }
        }
    }

    /// Remove a session whose debugger died on its own
    ///
    /// Does nothing if the session was already removed.
    pub async fn remove_exited(&self, session_id: &str) {
        if self.exists(session_id) {
            log::warn!("Removing GDB session {session_id}: process exited");
            self.terminate(session_id).await;
        }
    }
}
