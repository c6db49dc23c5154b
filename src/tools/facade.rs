//! Command façade core
//!
//! `GdbTools` resolves a session, checks preconditions, sends one command
//! and renders the reply. A session whose debugger dies under a command is
//! removed from the registry. Every capability method funnels through
//! [`GdbTools::dispatch`], the only place a failure is turned into text.

use std::sync::Arc;

use crate::error::{GdbError, Result};
use crate::message::render_replies;
use crate::registry::SessionRegistry;
use crate::transport::{ProcessLauncher, SubprocessLauncher};
use crate::types::messages::ReplyMessage;

use super::commands::GdbCommand;

/// Text-in, text-out debugger capabilities over a session registry
///
/// No method returns an error: failures come back as strings containing
/// `Error` (and `not found` for unknown sessions).
pub struct GdbTools<L: ProcessLauncher = SubprocessLauncher> {
    pub(super) registry: Arc<SessionRegistry<L>>,
}

impl<L: ProcessLauncher> Clone for GdbTools<L> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<L: ProcessLauncher> GdbTools<L> {
    /// Create a façade over `registry`
    #[must_use]
    pub fn new(registry: Arc<SessionRegistry<L>>) -> Self {
        Self { registry }
    }

    /// The underlying session registry
    #[must_use]
    pub fn registry(&self) -> &Arc<SessionRegistry<L>> {
        &self.registry
    }

    /// Run one command against a session and render the outcome
    pub async fn dispatch(&self, session_id: &str, command: GdbCommand<'_>) -> String {
        render_outcome(command.action(), self.execute(session_id, command).await)
    }

    async fn execute(&self, session_id: &str, command: GdbCommand<'_>) -> Result<Vec<ReplyMessage>> {
        let session = self.registry.resolve(session_id)?;
        command.check_preconditions()?;

        let outcome = session.send(&command.to_line()).await;
        if outcome.is_err() && session.is_closed() {
            self.registry.remove_exited(session_id).await;
        }
        outcome
    }
}

/// Render a command outcome as caller-facing text
///
/// Precondition failures read `Error: <reason>`; every other failure reads
/// `Error <action>: <error>`.
#[must_use]
pub fn render_outcome(action: &str, outcome: Result<Vec<ReplyMessage>>) -> String {
    match outcome {
        Ok(replies) => render_replies(&replies),
        Err(GdbError::Precondition(reason)) => format!("Error: {reason}"),
        Err(e) => format!("Error {action}: {e}"),
    }
}
