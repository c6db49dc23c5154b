//! Configuration constants for subprocess transport

/// Command asking GDB to exit; sent without a token, no reply is awaited
pub const EXIT_COMMAND: &str = "-gdb-exit";

/// Longest stderr line forwarded to the log
pub const STDERR_MAX_LINE_LENGTH: usize = 64 * 1024;
