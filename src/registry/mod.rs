//! GDB session management
//!
//! Provides `SessionRegistry`, the single source of truth for which debugger
//! sessions exist, and `GdbSession`, which serializes commands sent to one
//! debugger process.
//!
//! # Module Structure
//!
//! - `core` - `SessionRegistry` struct, constructors and shutdown
//! - `create` - Session creation
//! - `lookup` - Resolution, membership and listing
//! - `terminate` - Session termination
//! - `session` - Per-session state and command serialization
//! - `watch` - Removal of sessions whose debugger exits on its own

mod core;
mod create;
mod lookup;
mod session;
mod terminate;
mod watch;

pub use core::SessionRegistry;
pub use session::GdbSession;
