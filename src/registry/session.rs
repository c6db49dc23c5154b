//! Per-session state
//!
//! A session owns exactly one debugger process. Commands are serialized
//! through an async mutex so the machine-interface stream never sees two
//! overlapping commands; terminating a session fires a cancellation token
//! that releases every caller still queued on or holding that mutex. The
//! same token marks a session whose debugger died under a command.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::error::{GdbError, Result};
use crate::transport::DebuggerTransport;
use crate::types::identifiers::SessionId;
use crate::types::messages::ReplyMessage;

/// Live debugger session
pub struct GdbSession<P> {
    id: SessionId,
    created_at: DateTime<Utc>,
    process: Mutex<P>,
    cancel: CancellationToken,
    exited: CancellationToken,
}

impl<P> std::fmt::Debug for GdbSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GdbSession")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

impl<P: DebuggerTransport> GdbSession<P> {
    pub(super) fn new(id: SessionId, process: P) -> Self {
        let exited = process.exit_signal();
        Self {
            id,
            created_at: Utc::now(),
            process: Mutex::new(process),
            cancel: CancellationToken::new(),
            exited,
        }
    }

    /// Session identifier
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// When the session was created
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the session has been terminated or its process has died
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Send one command line and collect its reply
    ///
    /// Waits for any command already in flight on this session. If the
    /// session is terminated while waiting or while the command runs, the
    /// call fails with `SessionNotFound`. A failure that leaves the process
    /// dead closes the session.
    ///
    /// # Errors
    /// Returns `GdbError::SessionNotFound` if the session was terminated,
    /// otherwise whatever the transport reports
    pub async fn send(&self, command: &str) -> Result<Vec<ReplyMessage>> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(GdbError::session_not_found(self.id.as_str())),
            replies = async {
                let mut process = self.process.lock().await;
                log::debug!("[{}] -> {command}", self.id);
                let outcome = process.send(command).await;
                if outcome.is_err() && process.has_exited() {
                    log::warn!("[{}] GDB process exited unexpectedly", self.id);
                    self.cancel.cancel();
                }
                outcome
            } => replies,
        }
    }

    /// Resolves once the session is closed or its process has exited
    pub(super) async fn ended(&self) {
        tokio::select! {
            () = self.cancel.cancelled() => {}
            () = self.exited.cancelled() => {}
        }
    }

    /// Cancel pending callers and stop the process
    ///
    /// # Errors
    /// Returns error if the process did not stop cleanly
    pub(super) async fn close(&self) -> Result<()> {
        self.cancel.cancel();
        let mut process = self.process.lock().await;
        process.terminate().await
    }
}
