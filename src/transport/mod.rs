//! Transport layer for communicating with debugger processes
//!
//! This module provides the process abstraction the session registry is
//! built on, and the subprocess implementation that drives a real GDB.

pub mod subprocess;

use std::future::Future;
use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::types::messages::ReplyMessage;

/// A live debugger process accepting one command at a time
///
/// Callers must not overlap `send` calls; the session layer guarantees
/// exclusive access through `&mut self`.
pub trait DebuggerTransport: Send + 'static {
    /// Write one command line and collect its reply records
    ///
    /// # Arguments
    /// * `command` - Command text exactly as the debugger should parse it
    ///
    /// # Errors
    /// Returns error on timeout, broken pipe, or process exit
    fn send(&mut self, command: &str) -> impl Future<Output = Result<Vec<ReplyMessage>>> + Send;

    /// Ask the process to exit, killing it if it does not
    ///
    /// # Errors
    /// Returns error if the process could not be stopped cleanly
    fn terminate(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Token cancelled once the process has gone away on its own
    fn exit_signal(&self) -> CancellationToken;

    /// Whether the process is gone
    ///
    /// Consulted after a failed `send` to tell a dead debugger from a slow one.
    fn has_exited(&mut self) -> bool {
        self.exit_signal().is_cancelled()
    }
}

/// Spawns debugger processes
pub trait ProcessLauncher: Send + Sync + 'static {
    /// Process handle produced by this launcher
    type Process: DebuggerTransport;

    /// Start `executable` with `args`
    ///
    /// # Errors
    /// Returns `GdbError::Spawn` if the executable cannot be started
    fn spawn(
        &self,
        executable: &Path,
        args: &[String],
    ) -> impl Future<Output = Result<Self::Process>> + Send;
}

pub use subprocess::{GdbProcess, SubprocessLauncher};
