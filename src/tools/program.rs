//! Program loading and execution control

use crate::transport::ProcessLauncher;

use super::commands::GdbCommand;
use super::facade::GdbTools;

impl<L: ProcessLauncher> GdbTools<L> {
    /// Load a program into a session; the file must exist
    pub async fn load_program(&self, session_id: &str, program_path: &str) -> String {
        self.dispatch(session_id, GdbCommand::LoadProgram { path: program_path })
            .await
    }

    /// Attach to a running process
    pub async fn attach_to_process(&self, session_id: &str, pid: u32) -> String {
        self.dispatch(session_id, GdbCommand::Attach { pid }).await
    }

    /// Load a core dump for post-mortem analysis; the file must exist
    pub async fn load_core_dump(&self, session_id: &str, core_file: &str) -> String {
        self.dispatch(session_id, GdbCommand::LoadCore { path: core_file })
            .await
    }

    /// Continue execution
    pub async fn continue_execution(&self, session_id: &str) -> String {
        self.dispatch(session_id, GdbCommand::Continue).await
    }

    /// Step into the next source line
    pub async fn step_execution(&self, session_id: &str) -> String {
        self.dispatch(session_id, GdbCommand::Step).await
    }

    /// Step over the next source line
    pub async fn next_execution(&self, session_id: &str) -> String {
        self.dispatch(session_id, GdbCommand::Next).await
    }

    /// Run until the current function returns
    pub async fn finish_function(&self, session_id: &str) -> String {
        self.dispatch(session_id, GdbCommand::Finish).await
    }

    /// Send an arbitrary command line verbatim
    pub async fn execute_command(&self, session_id: &str, command: &str) -> String {
        self.dispatch(session_id, GdbCommand::Raw { command }).await
    }
}
