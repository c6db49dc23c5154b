//! GDB launch and command options
//!
//! This module contains the configuration for spawning debugger processes
//! and talking to them, including a builder pattern for easy configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{GdbError, Result};

/// Conventional debugger executable name, resolved through `PATH`
pub const DEFAULT_GDB_PATH: &str = "gdb";

/// Machine-interface selector passed to every spawned debugger
pub const DEFAULT_INTERPRETER_ARG: &str = "--interpreter=mi3";

/// Default per-command timeout (10 seconds)
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Default grace window for records trailing a result record
pub const DEFAULT_SETTLE_TIME: Duration = Duration::from_millis(100);

/// Default wait for a graceful exit before killing
pub const DEFAULT_EXIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default longest accepted MI line (1MB)
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Default cap on records queued between reads
pub const DEFAULT_MAX_BUFFERED_RECORDS: usize = 4096;

const ENV_GDB_PATH: &str = "GDB_PATH";
const ENV_COMMAND_TIMEOUT_MS: &str = "GDB_COMMAND_TIMEOUT_MS";
const ENV_SETTLE_MS: &str = "GDB_SETTLE_MS";

// ============================================================================
// GDB Options
// ============================================================================

/// Options for spawning and driving GDB sessions
#[derive(Debug, Clone)]
pub struct GdbOptions {
    /// Debugger executable used when a start request names none
    pub gdb_path: PathBuf,
    /// Arguments passed to every spawned debugger
    pub interpreter_args: Vec<String>,
    /// Upper bound on waiting for a command's result record
    pub command_timeout: Duration,
    /// How long to keep collecting records after the result record
    pub settle_time: Duration,
    /// How long a terminating debugger gets before it is killed
    pub exit_timeout: Duration,
    /// Longest MI line accepted from the debugger
    pub max_line_length: usize,
    /// Records kept while nobody is reading; the oldest are dropped beyond this
    pub max_buffered_records: usize,
}

impl Default for GdbOptions {
    fn default() -> Self {
        Self {
            gdb_path: PathBuf::from(DEFAULT_GDB_PATH),
            interpreter_args: vec![DEFAULT_INTERPRETER_ARG.to_string()],
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            settle_time: DEFAULT_SETTLE_TIME,
            exit_timeout: DEFAULT_EXIT_TIMEOUT,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_buffered_records: DEFAULT_MAX_BUFFERED_RECORDS,
        }
    }
}

impl GdbOptions {
    /// Create a new builder for `GdbOptions`
    #[must_use]
    pub fn builder() -> GdbOptionsBuilder {
        GdbOptionsBuilder::default()
    }

    /// Defaults overridden by `GDB_PATH`, `GDB_COMMAND_TIMEOUT_MS` and `GDB_SETTLE_MS`
    ///
    /// # Errors
    /// Returns `GdbError::InvalidConfig` if a numeric variable does not parse
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut options = Self::default();

        if let Some(path) = lookup(ENV_GDB_PATH).filter(|p| !p.trim().is_empty()) {
            options.gdb_path = PathBuf::from(path);
        }
        if let Some(ms) = lookup(ENV_COMMAND_TIMEOUT_MS) {
            options.command_timeout = parse_millis(ENV_COMMAND_TIMEOUT_MS, &ms)?;
        }
        if let Some(ms) = lookup(ENV_SETTLE_MS) {
            options.settle_time = parse_millis(ENV_SETTLE_MS, &ms)?;
        }

        Ok(options)
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| GdbError::invalid_config(format!("{key}={value:?}: {e}")))
}

// ============================================================================
// Builder for GdbOptions
// ============================================================================

/// Builder for `GdbOptions`
#[derive(Debug, Default)]
pub struct GdbOptionsBuilder {
    options: GdbOptions,
}

impl GdbOptionsBuilder {
    /// Set the default debugger executable
    #[must_use]
    pub fn gdb_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.gdb_path = path.into();
        self
    }

    /// Replace the debugger arguments
    #[must_use]
    pub fn interpreter_args(mut self, args: Vec<impl Into<String>>) -> Self {
        self.options.interpreter_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the per-command timeout
    #[must_use]
    pub const fn command_timeout(mut self, timeout: Duration) -> Self {
        self.options.command_timeout = timeout;
        self
    }

    /// Set the trailing-record grace window
    #[must_use]
    pub const fn settle_time(mut self, settle: Duration) -> Self {
        self.options.settle_time = settle;
        self
    }

    /// Set the graceful exit timeout
    #[must_use]
    pub const fn exit_timeout(mut self, timeout: Duration) -> Self {
        self.options.exit_timeout = timeout;
        self
    }

    /// Set the longest accepted MI line
    ///
    /// # Panics
    /// Panics if `len` is zero
    #[must_use]
    pub fn max_line_length(mut self, len: usize) -> Self {
        assert!(len > 0, "max_line_length must be non-zero");
        self.options.max_line_length = len;
        self
    }

    /// Set how many unread records are kept before the oldest are dropped
    ///
    /// # Panics
    /// Panics if `count` is zero
    #[must_use]
    pub fn max_buffered_records(mut self, count: usize) -> Self {
        assert!(count > 0, "max_buffered_records must be non-zero");
        self.options.max_buffered_records = count;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> GdbOptions {
        self.options
    }
}
