//! Command façade over GDB sessions
//!
//! `GdbTools` exposes one method per debugger capability. Each takes a
//! session ID plus capability parameters and returns rendered text.
//!
//! # Module Structure
//!
//! - `commands` - Declarative command table (wire templates, actions, preconditions)
//! - `facade` - `GdbTools` and the single failure-to-text boundary
//! - `session` - Session lifecycle strings
//! - `program` - Program loading, execution control, passthrough
//! - `breakpoints` - Breakpoints and watchpoints
//! - `inspection` - Stack, registers, memory, threads, symbols, disassembly
//! - `help` - Static help text

mod breakpoints;
pub mod commands;
mod facade;
pub mod help;
mod inspection;
mod program;
mod session;

pub use commands::{GdbCommand, WatchKind};
pub use facade::{GdbTools, render_outcome};
pub use help::HELP_TEXT;
