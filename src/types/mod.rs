//! Type definitions for the GDB tool server
//!
//! - [`identifiers`] - Type-safe session ID wrapper
//! - [`messages`] - Reply records produced by the debugger
//! - [`options`] - Launch and command configuration
//! - [`args`] - MCP tool argument structs

pub mod args;
pub mod identifiers;
pub mod messages;
pub mod options;

pub use identifiers::SessionId;
pub use messages::{ReplyKind, ReplyMessage};
pub use options::{GdbOptions, GdbOptionsBuilder};
