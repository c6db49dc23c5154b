//! # GDB Tools for MCP
//!
//! Drive GDB debugging sessions from AI assistants and other automation
//! clients. Each session is a GDB subprocess speaking the machine interface;
//! sessions are addressed by opaque IDs and every capability returns plain
//! text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use kodegen_tools_gdb::{GdbOptions, GdbTools, SessionRegistry};
//!
//! # async fn example() {
//! let registry = Arc::new(SessionRegistry::with_options(GdbOptions::default()));
//! let tools = GdbTools::new(Arc::clone(&registry));
//!
//! let started = tools.start_session(None).await;
//! let session_id = registry.list().remove(0);
//!
//! println!("{started}");
//! println!("{}", tools.load_program(session_id.as_str(), "/path/to/program").await);
//! println!("{}", tools.set_breakpoint(session_id.as_str(), "main").await);
//! println!("{}", tools.execute_command(session_id.as_str(), "run").await);
//!
//! registry.shutdown().await;
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`SessionRegistry`] owns live sessions: create, resolve, list, terminate.
//!   Commands to one session are serialized; different sessions run in parallel.
//!   A session whose debugger exits on its own is removed.
//! - [`GdbTools`] is the command façade: one method per capability, each
//!   resolving the session, sending a single command line and rendering the
//!   reply. Failures come back as text, never as errors.
//! - [`transport`] defines the process boundary ([`ProcessLauncher`],
//!   [`DebuggerTransport`]) and the tokio subprocess implementation.
//! - [`message`] parses machine-interface records and renders replies.
//! - [`server`] adapts the façade to MCP over stdio.
//!
//! ## Configuration
//!
//! [`GdbOptions::from_env`] reads `GDB_PATH`, `GDB_COMMAND_TIMEOUT_MS` and
//! `GDB_SETTLE_MS` on top of the defaults.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod message;
pub mod registry;
pub mod server;
pub mod tools;
pub mod transport;
pub mod types;

// Re-export commonly used types for external API
pub use error::{GdbError, Result};
pub use message::{parse_line, render_replies};
pub use registry::{GdbSession, SessionRegistry};
pub use server::{GdbServer, serve_stdio};
pub use tools::{GdbCommand, GdbTools, HELP_TEXT, WatchKind};
pub use transport::{DebuggerTransport, GdbProcess, ProcessLauncher, SubprocessLauncher};

// Re-export type submodules for flat public API
pub use types::identifiers::SessionId;
pub use types::messages::{ReplyKind, ReplyMessage};
pub use types::options::{GdbOptions, GdbOptionsBuilder};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
