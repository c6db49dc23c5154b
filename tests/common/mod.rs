//! In-memory debugger double shared by the integration tests
//!
//! `MockLauncher` hands out `MockProcess`es that record every command line
//! instead of talking to GDB. Some command lines have special behavior:
//!
//! - `hang` never completes
//! - `fail` returns a transport error
//! - `error` returns an `^error` result
//! - `silent` returns no records
//! - `crash` kills the process and returns a transport error
//!
//! Everything else answers with a console echo and a `done` result.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::Barrier;
use tokio_util::sync::CancellationToken;

use kodegen_tools_gdb::{
    DebuggerTransport, GdbError, GdbOptions, GdbTools, ProcessLauncher, ReplyMessage, Result,
    SessionId, SessionRegistry,
};

/// Everything the double observed
#[derive(Default)]
pub struct Recorder {
    /// Executable of every spawned process, in spawn order
    pub spawned: Mutex<Vec<PathBuf>>,
    /// `(process index, command line)` for every send
    pub sent: Mutex<Vec<(usize, String)>>,
    /// Number of terminate calls
    pub terminated: AtomicUsize,
    /// Sends that started while another send on the same process was running
    pub overlaps: AtomicUsize,
    /// Exit signal of every spawned process; cancel one to simulate a crash
    pub exits: Mutex<Vec<CancellationToken>>,
}

impl Recorder {
    pub fn sent_lines(&self) -> Vec<String> {
        self.sent.lock().iter().map(|(_, line)| line.clone()).collect()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[derive(Clone, Default)]
pub struct MockLauncher {
    pub recorder: Arc<Recorder>,
    pub fail_spawn: bool,
    pub fail_terminate: bool,
    pub send_delay: Duration,
    /// Every send waits on this barrier before answering
    pub gate: Option<Arc<Barrier>>,
}

pub struct MockProcess {
    index: usize,
    launcher: MockLauncher,
    busy: AtomicBool,
    exit: CancellationToken,
}

impl ProcessLauncher for MockLauncher {
    type Process = MockProcess;

    async fn spawn(&self, executable: &Path, _args: &[String]) -> Result<MockProcess> {
        if self.fail_spawn {
            return Err(GdbError::spawn(format!(
                "GDB executable '{}' not found in PATH",
                executable.display()
            )));
        }

        let index = {
            let mut spawned = self.recorder.spawned.lock();
            spawned.push(executable.to_path_buf());
            spawned.len() - 1
        };
        let exit = CancellationToken::new();
        self.recorder.exits.lock().push(exit.clone());

        Ok(MockProcess {
            index,
            launcher: self.clone(),
            busy: AtomicBool::new(false),
            exit,
        })
    }
}

impl DebuggerTransport for MockProcess {
    async fn send(&mut self, command: &str) -> Result<Vec<ReplyMessage>> {
        let recorder = Arc::clone(&self.launcher.recorder);

        if self.busy.swap(true, Ordering::SeqCst) {
            recorder.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        recorder.sent.lock().push((self.index, command.to_string()));

        if let Some(gate) = &self.launcher.gate {
            gate.wait().await;
        }
        if command == "hang" {
            std::future::pending::<()>().await;
        }
        if !self.launcher.send_delay.is_zero() {
            tokio::time::sleep(self.launcher.send_delay).await;
        }

        self.busy.store(false, Ordering::SeqCst);

        if self.exit.is_cancelled() {
            return Err(GdbError::transport("Failed to write to GDB stdin: Broken pipe"));
        }

        match command {
            "crash" => {
                self.exit.cancel();
                Err(GdbError::transport("GDB process exited"))
            }
            "fail" => Err(GdbError::transport("broken pipe")),
            "error" => Ok(vec![ReplyMessage::result(
                "error",
                Some(json!("No symbol \"nope\" in current context.")),
            )]),
            "silent" => Ok(Vec::new()),
            _ => Ok(vec![
                ReplyMessage::console(format!("ran {command}")),
                ReplyMessage::result("done", None),
            ]),
        }
    }

    async fn terminate(&mut self) -> Result<()> {
        self.launcher
            .recorder
            .terminated
            .fetch_add(1, Ordering::SeqCst);

        if self.launcher.fail_terminate {
            Err(GdbError::transport("kill failed"))
        } else {
            Ok(())
        }
    }

    fn exit_signal(&self) -> CancellationToken {
        self.exit.clone()
    }
}

pub fn registry(launcher: MockLauncher) -> Arc<SessionRegistry<MockLauncher>> {
    Arc::new(SessionRegistry::new(launcher, GdbOptions::default()))
}

pub fn tools(launcher: MockLauncher) -> GdbTools<MockLauncher> {
    GdbTools::new(registry(launcher))
}

pub async fn start(tools: &GdbTools<MockLauncher>) -> SessionId {
    tools
        .registry()
        .create(None)
        .await
        .expect("mock spawn succeeds")
}
