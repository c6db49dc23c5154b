//! Reply message type definitions
//!
//! A command sent to the debugger produces an ordered sequence of
//! [`ReplyMessage`]s. The kind set is open: records this crate does not
//! recognise travel as [`ReplyKind::Other`] and render through the generic
//! fallback.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Reply Kind
// ============================================================================

/// Kind tag of a single reply record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReplyKind {
    /// Console stream text (`~"..."`)
    Console,
    /// Debugger log stream text (`&"..."`)
    Log,
    /// Output written by the debugged program (`@"..."`)
    Target,
    /// Result record terminating a command (`^done`, `^error`, ...)
    Result,
    /// Asynchronous notification (`*stopped`, `=thread-created`, ...)
    Notify,
    /// Line the record grammar did not recognise
    Output,
    /// Any other kind, kept verbatim
    Other(String),
}

impl ReplyKind {
    /// Wire name of the kind
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Console => "console",
            Self::Log => "log",
            Self::Target => "target",
            Self::Result => "result",
            Self::Notify => "notify",
            Self::Output => "output",
            Self::Other(name) => name,
        }
    }
}

impl Default for ReplyKind {
    fn default() -> Self {
        Self::Other("unknown".to_string())
    }
}

impl From<&str> for ReplyKind {
    fn from(s: &str) -> Self {
        match s {
            "console" => Self::Console,
            "log" => Self::Log,
            "target" => Self::Target,
            "result" => Self::Result,
            "notify" => Self::Notify,
            "output" => Self::Output,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ReplyKind {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ReplyKind> for String {
    fn from(kind: ReplyKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Reply Message
// ============================================================================

/// One unit of debugger output for a submitted command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyMessage {
    /// Record kind
    #[serde(rename = "type", default)]
    pub kind: ReplyKind,
    /// Result/notification class (`done`, `error`, `running`, `stopped`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Stream text or structured result values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Command token echoed by the debugger, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<u64>,
}

impl ReplyMessage {
    /// Create a stream record carrying plain text
    pub fn stream(kind: ReplyKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            payload: Some(Value::String(text.into())),
            ..Default::default()
        }
    }

    /// Create a console stream record
    pub fn console(text: impl Into<String>) -> Self {
        Self::stream(ReplyKind::Console, text)
    }

    /// Create a result record with the given status class
    pub fn result(status: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            kind: ReplyKind::Result,
            message: Some(status.into()),
            payload,
            token: None,
        }
    }

    /// Attach a command token
    #[must_use]
    pub fn with_token(mut self, token: Option<u64>) -> Self {
        self.token = token;
        self
    }

    /// Whether this record terminates the command carrying `token`
    #[must_use]
    pub fn terminates(&self, token: u64) -> bool {
        self.kind == ReplyKind::Result && self.token == Some(token)
    }
}
