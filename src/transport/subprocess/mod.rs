//! Subprocess transport implementation driving a GDB/MI process
//!
//! This module provides a transport implementation that spawns GDB with the
//! machine interpreter and communicates with it via stdin/stdout.

mod command;
mod config;
mod lifecycle;
mod reader;
mod transport;

// Re-export public types
pub use transport::{GdbProcess, SubprocessLauncher};
