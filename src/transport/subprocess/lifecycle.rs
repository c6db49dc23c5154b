//! Lifecycle management for subprocess transport (spawn, terminate)

use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;

use crate::error::{GdbError, Result};
use crate::types::options::GdbOptions;

use super::command::CommandBuilder;
use super::config::EXIT_COMMAND;
use super::reader::{spawn_record_reader, spawn_stderr_forwarder};
use super::transport::GdbProcess;

impl GdbProcess {
    /// Spawn the debugger and wire up its stdio
    ///
    /// # Errors
    /// Returns `GdbError::Spawn` if the executable cannot be found or started,
    /// or stdio handles cannot be obtained
    pub(super) async fn spawn_impl(
        executable: &Path,
        args: &[String],
        options: &GdbOptions,
    ) -> Result<Self> {
        let mut cmd = CommandBuilder::new(executable, args).build()?;

        // stderr is piped so the debugger never touches the server's terminal
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            GdbError::spawn(format!("'{}': {e}", executable.display()))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| GdbError::spawn("Failed to get stdin handle"))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| GdbError::spawn("Failed to get stdout handle"))?;

        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| GdbError::spawn("Failed to get stderr handle"))?;

        let label = match child.id() {
            Some(pid) => format!("gdb:{pid}"),
            None => "gdb".to_string(),
        };

        let (records, reader_task) = spawn_record_reader(
            stdout,
            options.max_line_length,
            options.max_buffered_records,
            label.clone(),
        );
        let stderr_task = spawn_stderr_forwarder(stderr, label.clone());

        log::debug!(
            "[{label}] spawned {} {}",
            executable.display(),
            args.join(" ")
        );

        Ok(Self {
            label,
            child: Some(child),
            stdin: Some(stdin),
            records,
            reader_task: Some(reader_task),
            stderr_task: Some(stderr_task),
            next_token: 1,
            command_timeout: options.command_timeout,
            settle_time: options.settle_time,
            exit_timeout: options.exit_timeout,
        })
    }

    /// Ask GDB to exit, wait for it, and kill it if it lingers
    ///
    /// # Errors
    /// Returns error if waiting on or killing the process fails
    pub(super) async fn terminate_impl(&mut self) -> Result<()> {
        if let Some(mut stdin) = self.stdin.take() {
            let _ = stdin.write_all(format!("{EXIT_COMMAND}\n").as_bytes()).await;
            let _ = stdin.flush().await;
            let _ = stdin.shutdown().await;
        }

        if let Some(task) = self.reader_task.take() {
            task.abort();
        }
        if let Some(task) = self.stderr_task.take() {
            task.abort();
        }

        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        match tokio::time::timeout(self.exit_timeout, child.wait()).await {
            Ok(Ok(status)) => {
                log::debug!("[{}] exited with {status}", self.label);
                Ok(())
            }
            Ok(Err(e)) => Err(GdbError::Io(e)),
            Err(_) => {
                log::debug!(
                    "[{}] did not exit within {} ms, killing",
                    self.label,
                    self.exit_timeout.as_millis()
                );
                child.kill().await.map_err(GdbError::Io)
            }
        }
    }

    /// Handle Drop cleanup
    pub(super) fn drop_impl(&mut self) {
        if let Some(task) = self.reader_task.take() {
            task.abort();
        }

        if let Some(task) = self.stderr_task.take() {
            task.abort();
        }

        if let Some(mut child) = self.child.take() {
            let _ = child.start_kill();
        }
    }
}
