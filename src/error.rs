//! Error types for the GDB tool server

use thiserror::Error;

/// Main error type for GDB session management
#[derive(Error, Debug)]
pub enum GdbError {
    /// The debugger executable could not be started
    #[error("Failed to start GDB: {0}")]
    Spawn(String),

    /// No live session is registered under the identifier
    #[error("GDB session '{0}' not found. Use gdb_list_sessions to see active sessions.")]
    SessionNotFound(String),

    /// Capability input rejected before the debugger was contacted
    #[error("{0}")]
    Precondition(String),

    /// Failure talking to a running debugger process
    #[error("Transport error: {0}")]
    Transport(String),

    /// The debugger did not finish a command in time
    #[error("Timeout: {0}")]
    Timeout(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for GDB operations
pub type Result<T> = std::result::Result<T, GdbError>;

impl GdbError {
    /// Create a spawn error
    pub fn spawn(msg: impl Into<String>) -> Self {
        Self::Spawn(msg.into())
    }

    /// Create a session not found error
    pub fn session_not_found(session_id: impl Into<String>) -> Self {
        Self::SessionNotFound(session_id.into())
    }

    /// Create a precondition error
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether this error means the session is gone
    #[must_use]
    pub fn is_session_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound(_))
    }
}
