//! Breakpoint and watchpoint capabilities

use crate::transport::ProcessLauncher;

use super::commands::{GdbCommand, WatchKind};
use super::facade::GdbTools;

impl<L: ProcessLauncher> GdbTools<L> {
    /// Set a breakpoint at a location (function, `file:line`, `*address`)
    pub async fn set_breakpoint(&self, session_id: &str, location: &str) -> String {
        self.dispatch(session_id, GdbCommand::SetBreakpoint { location })
            .await
    }

    /// List all breakpoints
    pub async fn get_breakpoint_list(&self, session_id: &str) -> String {
        self.dispatch(session_id, GdbCommand::BreakpointList).await
    }

    /// Delete a breakpoint by number
    pub async fn delete_breakpoint(&self, session_id: &str, breakpoint_number: &str) -> String {
        self.dispatch(
            session_id,
            GdbCommand::DeleteBreakpoint {
                number: breakpoint_number,
            },
        )
        .await
    }

    /// Enable a breakpoint by number
    pub async fn enable_breakpoint(&self, session_id: &str, breakpoint_number: &str) -> String {
        self.dispatch(
            session_id,
            GdbCommand::EnableBreakpoint {
                number: breakpoint_number,
            },
        )
        .await
    }

    /// Disable a breakpoint by number
    pub async fn disable_breakpoint(&self, session_id: &str, breakpoint_number: &str) -> String {
        self.dispatch(
            session_id,
            GdbCommand::DisableBreakpoint {
                number: breakpoint_number,
            },
        )
        .await
    }

    /// Set a watchpoint
    ///
    /// `watch_type` is `write`, `read` or `access`; anything else watches writes.
    pub async fn set_watchpoint(&self, session_id: &str, expression: &str, watch_type: &str) -> String {
        let kind = WatchKind::parse(watch_type);
        self.dispatch(session_id, GdbCommand::Watchpoint { expression, kind })
            .await
    }
}
