//! Subprocess transport implementation for GDB/MI

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{GdbError, Result};
use crate::transport::{DebuggerTransport, ProcessLauncher};
use crate::types::messages::{ReplyKind, ReplyMessage};
use crate::types::options::GdbOptions;

use super::reader::RecordBuffer;

/// A running GDB speaking the machine interface over stdio
///
/// Each command is written as `<token><command>`; its reply ends at the
/// result record echoing that token. Commands that already carry a token
/// are written unchanged and wait for their own.
pub struct GdbProcess {
    pub(super) label: String,
    pub(super) child: Option<Child>,
    pub(super) stdin: Option<ChildStdin>,
    pub(super) records: Arc<RecordBuffer>,
    pub(super) reader_task: Option<JoinHandle<()>>,
    pub(super) stderr_task: Option<JoinHandle<()>>,
    pub(super) next_token: u64,
    pub(super) command_timeout: Duration,
    pub(super) settle_time: Duration,
    pub(super) exit_timeout: Duration,
}

/// Which result record ends a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplyEnd {
    /// The result record carrying this token
    Token(u64),
    /// The first result record, for caller tokens too long to track
    AnyResult,
}

impl ReplyEnd {
    fn matches(self, record: &ReplyMessage) -> bool {
        match self {
            Self::Token(token) => record.terminates(token),
            Self::AnyResult => record.kind == ReplyKind::Result,
        }
    }
}

/// The token a command was already written with, if any
///
/// `None` means the command is untokened; `Some(ReplyEnd::AnyResult)` means
/// it starts with more digits than a token can hold.
fn caller_token(command: &str) -> Option<ReplyEnd> {
    let digits = command.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    Some(
        command[..digits]
            .parse::<u64>()
            .map_or(ReplyEnd::AnyResult, ReplyEnd::Token),
    )
}

impl GdbProcess {
    /// Spawn `executable` with `args`, configured by `options`
    ///
    /// # Errors
    /// Returns `GdbError::Spawn` if the process cannot be started
    pub async fn spawn(executable: &Path, args: &[String], options: &GdbOptions) -> Result<Self> {
        Self::spawn_impl(executable, args, options).await
    }

    /// OS process id, while the process is owned
    #[must_use]
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(Child::id)
    }

    /// Move records that arrived between commands into `out`
    ///
    /// Stale result records (answers to commands that timed out) are dropped.
    fn drain_pending(&mut self, out: &mut Vec<ReplyMessage>) {
        while let Some(record) = self.records.try_pop() {
            match record {
                Ok(record) => self.keep_unless_stale(record, out),
                Err(e) => log::warn!("[{}] discarding unreadable output: {e}", self.label),
            }
        }
    }

    fn keep_unless_stale(&self, record: ReplyMessage, out: &mut Vec<ReplyMessage>) {
        if record.kind == ReplyKind::Result && record.token.is_some() {
            log::debug!(
                "[{}] discarding stale result for token {:?}",
                self.label,
                record.token
            );
        } else {
            out.push(record);
        }
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| GdbError::transport("stdin not available"))?;

        stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|e| GdbError::transport(format!("Failed to write to GDB stdin: {e}")))?;

        stdin
            .flush()
            .await
            .map_err(|e| GdbError::transport(format!("Failed to flush GDB stdin: {e}")))?;

        Ok(())
    }

    /// Collect records up to and including the result matching `end`,
    /// then whatever trails it within the settle window
    ///
    /// An unreadable record fails the command, but only once the rest of its
    /// reply has been consumed so it cannot leak into the next one.
    async fn collect_reply(
        &mut self,
        end: ReplyEnd,
        command: &str,
        out: &mut Vec<ReplyMessage>,
    ) -> Result<()> {
        let deadline = Instant::now() + self.command_timeout;
        let records = Arc::clone(&self.records);
        let mut failure = None;

        loop {
            match tokio::time::timeout_at(deadline, records.recv()).await {
                Err(_) => {
                    return Err(failure.unwrap_or_else(|| {
                        GdbError::timeout(format!(
                            "GDB did not answer '{command}' within {} ms",
                            self.command_timeout.as_millis()
                        ))
                    }));
                }
                Ok(None) => {
                    return Err(failure.unwrap_or_else(|| GdbError::transport("GDB process exited")));
                }
                Ok(Some(Err(e))) => {
                    log::warn!("[{}] unreadable output for '{command}': {e}", self.label);
                    failure.get_or_insert(e);
                }
                Ok(Some(Ok(record))) => {
                    if end.matches(&record) {
                        out.push(record);
                        break;
                    }
                    self.keep_unless_stale(record, out);
                }
            }
        }

        if let Some(e) = failure {
            return Err(e);
        }

        let settle_deadline = Instant::now() + self.settle_time;
        loop {
            match tokio::time::timeout_at(settle_deadline, records.recv()).await {
                Ok(Some(Ok(record))) => self.keep_unless_stale(record, out),
                Ok(Some(Err(e))) => {
                    log::warn!("[{}] trailing output unreadable: {e}", self.label);
                    break;
                }
                Ok(None) | Err(_) => break,
            }
        }

        Ok(())
    }
}

impl DebuggerTransport for GdbProcess {
    async fn send(&mut self, command: &str) -> Result<Vec<ReplyMessage>> {
        let command = command.trim_end_matches(['\r', '\n']);

        let (end, line) = match caller_token(command) {
            Some(end) => (end, format!("{command}\n")),
            None => {
                let token = self.next_token;
                self.next_token += 1;
                (ReplyEnd::Token(token), format!("{token}{command}\n"))
            }
        };

        let mut replies = Vec::new();
        self.drain_pending(&mut replies);

        log::debug!("[{}] mi -> {}", self.label, line.trim_end());
        self.write_line(&line).await?;
        self.collect_reply(end, command, &mut replies).await?;

        Ok(replies)
    }

    async fn terminate(&mut self) -> Result<()> {
        self.terminate_impl().await
    }

    fn exit_signal(&self) -> CancellationToken {
        self.records.exit_signal()
    }

    fn has_exited(&mut self) -> bool {
        if self.records.is_closed() {
            return true;
        }
        match self.child.as_mut() {
            Some(child) => !matches!(child.try_wait(), Ok(None)),
            None => true,
        }
    }
}

impl Drop for GdbProcess {
    fn drop(&mut self) {
        self.drop_impl();
    }
}

// ============================================================================
// LAUNCHER
// ============================================================================

/// Launches real GDB subprocesses
#[derive(Debug, Clone, Default)]
pub struct SubprocessLauncher {
    options: GdbOptions,
}

impl SubprocessLauncher {
    /// Create a launcher whose processes use `options` for timeouts and limits
    #[must_use]
    pub fn new(options: GdbOptions) -> Self {
        Self { options }
    }

    /// Options applied to spawned processes
    #[must_use]
    pub fn options(&self) -> &GdbOptions {
        &self.options
    }
}

impl ProcessLauncher for SubprocessLauncher {
    type Process = GdbProcess;

    async fn spawn(&self, executable: &Path, args: &[String]) -> Result<GdbProcess> {
        GdbProcess::spawn(executable, args, &self.options).await
    }
}
