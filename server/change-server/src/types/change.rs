//! Wire and normalized representations of a Change request

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The only request kind this API accepts
pub const CHANGE_KIND: &str = "Change";

/// Branch used when the caller leaves `spec.branch` absent or empty
pub const DEFAULT_BRANCH: &str = "main";

/// Change request exactly as it arrives on the wire
///
/// Missing string and list fields deserialize to their empty value so the
/// validator can report them with a field-specific code. Fields present with
/// the wrong JSON type still fail to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequest {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub spec: ChangeRequestSpec,
}

/// Parameters of the requested change, as received
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequestSpec {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub repos: Vec<String>,
    #[serde(default)]
    pub agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl ChangeRequestSpec {
    /// Whether the branch needs to be defaulted
    pub fn branch_is_unset(&self) -> bool {
        self.branch.as_deref().map_or(true, str::is_empty)
    }
}

/// Automation tool that would carry out a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Agent {
    CopilotCli,
    GeminiCli,
}

impl Agent {
    /// Every recognized agent
    pub const ALL: [Agent; 2] = [Agent::CopilotCli, Agent::GeminiCli];

    pub fn as_str(self) -> &'static str {
        match self {
            Agent::CopilotCli => "copilot-cli",
            Agent::GeminiCli => "gemini-cli",
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown agent: {0}")]
pub struct UnknownAgent(pub String);

impl FromStr for Agent {
    type Err = UnknownAgent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "copilot-cli" => Ok(Agent::CopilotCli),
            "gemini-cli" => Ok(Agent::GeminiCli),
            other => Err(UnknownAgent(other.to_string())),
        }
    }
}

/// Accepted change, echoed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub kind: String,
    pub api_version: String,
    pub spec: ChangeSpec,
}

/// Normalized change parameters; `branch` is always populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSpec {
    pub prompt: String,
    pub repos: Vec<String>,
    pub agent: Agent,
    pub branch: String,
}
