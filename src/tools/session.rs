//! Session lifecycle capabilities
//!
//! These are pure registry calls; nothing is sent to a debugger.

use std::path::Path;

use crate::transport::ProcessLauncher;

use super::facade::GdbTools;

impl<L: ProcessLauncher> GdbTools<L> {
    /// Start a new GDB session
    ///
    /// # Arguments
    /// * `gdb_path` - Debugger executable; `None` uses the configured default
    pub async fn start_session(&self, gdb_path: Option<&str>) -> String {
        match self.registry.create(gdb_path.map(Path::new)).await {
            Ok(session_id) => {
                format!("GDB session started successfully. Session ID: {session_id}")
            }
            Err(e) => format!("Error starting GDB session: {e}"),
        }
    }

    /// Terminate a GDB session
    pub async fn terminate_session(&self, session_id: &str) -> String {
        if self.registry.terminate(session_id).await {
            format!("GDB session '{session_id}' terminated successfully")
        } else {
            format!("GDB session '{session_id}' not found")
        }
    }

    /// List active GDB sessions
    #[must_use]
    pub fn list_sessions(&self) -> String {
        let sessions = self.registry.list();
        if sessions.is_empty() {
            return "No active GDB sessions".to_string();
        }

        let lines: Vec<String> = sessions.iter().map(|id| format!("- {id}")).collect();
        format!("Active GDB sessions:\n{}", lines.join("\n"))
    }

    /// Session listing in the form served by the `gdb://sessions` resource
    #[must_use]
    pub fn sessions_resource(&self) -> String {
        let sessions = self.registry.list();
        if sessions.is_empty() {
            return "No active GDB sessions".to_string();
        }

        let lines: Vec<String> = sessions
            .iter()
            .map(|id| format!("Session ID: {id}"))
            .collect();
        format!("Active GDB Sessions:\n{}", lines.join("\n"))
    }
}
