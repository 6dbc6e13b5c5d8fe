//! Audit trail for change validation decisions
//!
//! The validator never writes logs directly. It reports each outcome to a
//! [`DecisionLog`] handed to it at construction, so the same decisions can be
//! sent to `tracing` in production and captured in memory under test.

use crate::types::Change;
use crate::validation::ChangeRejection;

/// Receives the outcome of every change validation
pub trait DecisionLog: Send + Sync {
    /// A payload was refused; called once per rejected request
    fn rejected(&self, rejection: &ChangeRejection);

    /// `spec.branch` was absent or empty and has been replaced by `branch`
    fn branch_defaulted(&self, branch: &str);

    /// A payload passed every rule
    fn accepted(&self, change: &Change);
}

/// Writes decisions as structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDecisionLog;

impl DecisionLog for TracingDecisionLog {
    fn rejected(&self, rejection: &ChangeRejection) {
        let decision = rejection.code();
        match rejection {
            ChangeRejection::InvalidRequest(detail) => {
                tracing::error!(decision, error = %detail, "Failed to parse change request");
            }
            ChangeRejection::InvalidKind { kind } => {
                tracing::warn!(decision, kind = %kind, "Invalid kind field");
            }
            ChangeRejection::MissingApiVersion => {
                tracing::warn!(decision, "Missing apiVersion field");
            }
            ChangeRejection::MissingPrompt => {
                tracing::warn!(decision, "Missing prompt in spec");
            }
            ChangeRejection::MissingRepos => {
                tracing::warn!(decision, "No repositories specified");
            }
            ChangeRejection::MissingAgent => {
                tracing::warn!(decision, "Missing agent in spec");
            }
            ChangeRejection::InvalidAgent { agent } => {
                tracing::warn!(decision, agent = %agent, "Invalid agent specified");
            }
        }
    }

    fn branch_defaulted(&self, branch: &str) {
        tracing::info!(branch, "Using default branch");
    }

    fn accepted(&self, change: &Change) {
        tracing::info!(
            decision = "accepted",
            api_version = %change.api_version,
            prompt = %change.spec.prompt,
            repos = ?change.spec.repos,
            agent = %change.spec.agent,
            branch = %change.spec.branch,
            "Change request received"
        );
    }
}

#[cfg(test)]
pub(crate) use recording::{Decision, RecordingDecisionLog};
