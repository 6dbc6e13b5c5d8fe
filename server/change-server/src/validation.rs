//! Change request validation
//!
//! Rules run in a fixed order over an immutable [`ChangeRequest`] and the
//! first violated rule decides the rejection. Nothing is aggregated: a
//! payload missing both `prompt` and `repos` is reported as `missing_prompt`.
//!
//! 1. payload parses into the expected shape (`invalid_request`)
//! 2. `kind` is exactly `Change` (`invalid_kind`)
//! 3. `apiVersion` is non-empty (`missing_api_version`)
//! 4. `spec.prompt` is non-empty (`missing_prompt`)
//! 5. `spec.repos` has at least one entry (`missing_repos`)
//! 6. `spec.agent` is non-empty (`missing_agent`)
//! 7. `spec.agent` is a known [`Agent`] (`invalid_agent`)
//!
//! An absent or empty `spec.branch` is then normalized to [`DEFAULT_BRANCH`].

use std::sync::Arc;

use thiserror::Error;

use crate::services::DecisionLog;
use crate::types::{
    Agent, Change, ChangeRequest, ChangeSpec, UnknownAgent, CHANGE_KIND, DEFAULT_BRANCH,
};

/// Reason a change request was refused; `Display` is the client-facing message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeRejection {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("kind must be 'Change'")]
    InvalidKind { kind: String },

    #[error("apiVersion is required")]
    MissingApiVersion,

    #[error("spec.prompt is required")]
    MissingPrompt,

    #[error("spec.repos must contain at least one repository")]
    MissingRepos,

    #[error("spec.agent is required")]
    MissingAgent,

    #[error("spec.agent must be either 'copilot-cli' or 'gemini-cli'")]
    InvalidAgent { agent: String },
}

impl ChangeRejection {
    /// Machine-readable error code returned in the `error` field
    pub fn code(&self) -> &'static str {
        match self {
            ChangeRejection::InvalidRequest(_) => "invalid_request",
            ChangeRejection::InvalidKind { .. } => "invalid_kind",
            ChangeRejection::MissingApiVersion => "missing_api_version",
            ChangeRejection::MissingPrompt => "missing_prompt",
            ChangeRejection::MissingRepos => "missing_repos",
            ChangeRejection::MissingAgent => "missing_agent",
            ChangeRejection::InvalidAgent { .. } => "invalid_agent",
        }
    }
}

/// Trait for validating request payloads into their normalized form
pub trait RequestValidation {
    type Validated;

    /// Returns the normalized value, or the first rule the payload violates.
    ///
    /// # Errors
    ///
    /// Returns a [`ChangeRejection`] naming the first failed rule.
    fn validate(&self) -> Result<Self::Validated, ChangeRejection>;
}

/// Return early with `$rejection` unless `$predicate` holds
macro_rules! ensure_rule {
    ($predicate:expr, $rejection:expr) => {
        if !$predicate {
            return Err($rejection);
        }
    };
}

impl RequestValidation for ChangeRequest {
    type Validated = Change;

    fn validate(&self) -> Result<Change, ChangeRejection> {
        ensure_rule!(
            self.kind == CHANGE_KIND,
            ChangeRejection::InvalidKind {
                kind: self.kind.clone()
            }
        );
        ensure_rule!(!self.api_version.is_empty(), ChangeRejection::MissingApiVersion);

        let spec = &self.spec;
        ensure_rule!(!spec.prompt.is_empty(), ChangeRejection::MissingPrompt);
        ensure_rule!(!spec.repos.is_empty(), ChangeRejection::MissingRepos);
        ensure_rule!(!spec.agent.is_empty(), ChangeRejection::MissingAgent);

        let agent = spec
            .agent
            .parse::<Agent>()
            .map_err(|UnknownAgent(agent)| ChangeRejection::InvalidAgent { agent })?;

        let branch = match spec.branch.as_deref() {
            Some(branch) if !branch.is_empty() => branch.to_string(),
            _ => DEFAULT_BRANCH.to_string(),
        };

        Ok(Change {
            kind: self.kind.clone(),
            api_version: self.api_version.clone(),
            spec: ChangeSpec {
                prompt: spec.prompt.clone(),
                repos: spec.repos.clone(),
                agent,
                branch,
            },
        })
    }
}

/// Parse a raw JSON body into a [`ChangeRequest`].
///
/// # Errors
///
/// Returns [`ChangeRejection::InvalidRequest`] carrying the parser's message
/// when the body is not JSON or a field has the wrong type.
pub fn parse_change(body: &[u8]) -> Result<ChangeRequest, ChangeRejection> {
    serde_json::from_slice(body).map_err(|e| ChangeRejection::InvalidRequest(e.to_string()))
}

/// Validates change payloads and reports every decision to a [`DecisionLog`]
#[derive(Clone)]
pub struct ChangeValidator {
    log: Arc<dyn DecisionLog>,
}

impl ChangeValidator {
    pub fn new(log: Arc<dyn DecisionLog>) -> Self {
        Self { log }
    }

    /// Run the full rule chain over a raw request body.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChangeRejection`] hit while parsing or validating.
    pub fn validate_payload(&self, body: &[u8]) -> Result<Change, ChangeRejection> {
        let outcome = parse_change(body).and_then(|request| {
            let change = request.validate()?;
            if request.spec.branch_is_unset() {
                self.log.branch_defaulted(&change.spec.branch);
            }
            Ok(change)
        });

        match &outcome {
            Ok(change) => self.log.accepted(change),
            Err(rejection) => self.log.rejected(rejection),
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::decision_log::{Decision, RecordingDecisionLog};
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn valid_payload() -> Value {
        json!({
            "kind": "Change",
            "apiVersion": "v1",
            "spec": {
                "prompt": "Add comprehensive error handling to all API endpoints",
                "repos": ["https://github.com/myorg/repo1", "https://github.com/myorg/repo2"],
                "agent": "copilot-cli",
                "branch": "main"
            }
        })
    }

    fn validate(payload: &Value) -> Result<Change, ChangeRejection> {
        serde_json::from_value::<ChangeRequest>(payload.clone())
            .map_err(|e| ChangeRejection::InvalidRequest(e.to_string()))?
            .validate()
    }

    fn code_of(payload: &Value) -> &'static str {
        validate(payload).unwrap_err().code()
    }

    #[test]
    fn test_valid_payload_is_accepted() {
        let change = validate(&valid_payload()).unwrap();
        assert_eq!(change.kind, "Change");
        assert_eq!(change.api_version, "v1");
        assert_eq!(change.spec.agent, Agent::CopilotCli);
        assert_eq!(change.spec.repos.len(), 2);
        assert_eq!(change.spec.branch, "main");
    }

    #[test]
    fn test_kind_is_case_sensitive() {
        let mut payload = valid_payload();
        payload["kind"] = json!("change");
        assert_eq!(
            validate(&payload),
            Err(ChangeRejection::InvalidKind {
                kind: "change".to_string()
            })
        );
    }

    #[test]
    fn test_missing_kind_is_invalid_kind() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("kind");
        assert_eq!(code_of(&payload), "invalid_kind");
    }

    #[test]
    fn test_missing_api_version() {
        let mut payload = valid_payload();
        payload["apiVersion"] = json!("");
        assert_eq!(code_of(&payload), "missing_api_version");
    }

    #[test]
    fn test_any_api_version_is_accepted() {
        let mut payload = valid_payload();
        payload["apiVersion"] = json!("not-a-version");
        assert!(validate(&payload).is_ok());
    }

    #[test]
    fn test_missing_prompt_wins_over_missing_repos() {
        let payload = json!({
            "kind": "Change",
            "apiVersion": "v1",
            "spec": { "agent": "copilot-cli" }
        });
        assert_eq!(code_of(&payload), "missing_prompt");
    }

    #[test]
    fn test_invalid_kind_wins_over_everything_else() {
        let payload = json!({ "kind": "InvalidKind" });
        assert_eq!(code_of(&payload), "invalid_kind");
    }

    #[test]
    fn test_empty_repos() {
        let mut payload = valid_payload();
        payload["spec"]["repos"] = json!([]);
        assert_eq!(code_of(&payload), "missing_repos");
    }

    #[test]
    fn test_missing_agent_before_invalid_agent() {
        let mut payload = valid_payload();
        payload["spec"]["agent"] = json!("");
        assert_eq!(code_of(&payload), "missing_agent");
    }

    #[test]
    fn test_unknown_agent() {
        let mut payload = valid_payload();
        payload["spec"]["agent"] = json!("invalid-agent");
        assert_eq!(
            validate(&payload),
            Err(ChangeRejection::InvalidAgent {
                agent: "invalid-agent".to_string()
            })
        );
    }

    #[test]
    fn test_branch_defaults_when_absent_or_empty() {
        let mut payload = valid_payload();
        payload["spec"].as_object_mut().unwrap().remove("branch");
        assert_eq!(validate(&payload).unwrap().spec.branch, DEFAULT_BRANCH);

        payload["spec"]["branch"] = json!("");
        assert_eq!(validate(&payload).unwrap().spec.branch, DEFAULT_BRANCH);

        payload["spec"]["branch"] = Value::Null;
        assert_eq!(validate(&payload).unwrap().spec.branch, DEFAULT_BRANCH);
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(ChangeRejection::MissingApiVersion.to_string(), "apiVersion is required");
        assert_eq!(
            ChangeRejection::MissingRepos.to_string(),
            "spec.repos must contain at least one repository"
        );
        assert_eq!(
            ChangeRejection::InvalidAgent {
                agent: "x".to_string()
            }
            .to_string(),
            "spec.agent must be either 'copilot-cli' or 'gemini-cli'"
        );
    }

    #[test]
    fn test_malformed_body_is_invalid_request() {
        let validator = ChangeValidator::new(Arc::new(RecordingDecisionLog::default()));
        let rejection = validator.validate_payload(b"{not json").unwrap_err();
        assert_eq!(rejection.code(), "invalid_request");
        assert!(!rejection.to_string().is_empty());

        let rejection = validator.validate_payload(b"").unwrap_err();
        assert_eq!(rejection.code(), "invalid_request");
    }

    #[test]
    fn test_non_string_prompt_is_invalid_request() {
        let validator = ChangeValidator::new(Arc::new(RecordingDecisionLog::default()));
        let body = br#"{"kind":"Change","apiVersion":"v1","spec":{"prompt":42}}"#;
        assert_eq!(validator.validate_payload(body).unwrap_err().code(), "invalid_request");
    }

    #[test]
    fn test_validator_reports_decisions() {
        let log = Arc::new(RecordingDecisionLog::default());
        let validator = ChangeValidator::new(log.clone());

        let mut payload = valid_payload();
        payload["spec"].as_object_mut().unwrap().remove("branch");
        let body = serde_json::to_vec(&payload).unwrap();
        validator.validate_payload(&body).unwrap();

        let body = serde_json::to_vec(&json!({ "kind": "Nope" })).unwrap();
        validator.validate_payload(&body).unwrap_err();

        assert_eq!(
            log.decisions(),
            vec![
                Decision::BranchDefaulted("main".to_string()),
                Decision::Accepted {
                    agent: Agent::CopilotCli,
                    branch: "main".to_string(),
                },
                Decision::Rejected("invalid_kind"),
            ]
        );
    }

    #[test]
    fn test_validation_is_stateless() {
        let validator = ChangeValidator::new(Arc::new(RecordingDecisionLog::default()));
        let body = serde_json::to_vec(&valid_payload()).unwrap();
        let first = validator.validate_payload(&body).unwrap();
        let second = validator.validate_payload(&body).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_unknown_agents_are_rejected(agent in "\\PC{1,24}") {
            prop_assume!(agent.parse::<Agent>().is_err());
            let mut payload = valid_payload();
            payload["spec"]["agent"] = json!(agent);
            prop_assert_eq!(code_of(&payload), "invalid_agent");
        }

        #[test]
        fn prop_non_empty_branch_is_echoed(branch in "[a-zA-Z0-9/_.-]{1,40}") {
            let mut payload = valid_payload();
            payload["spec"]["branch"] = json!(branch.clone());
            prop_assert_eq!(validate(&payload).unwrap().spec.branch, branch);
        }

        #[test]
        fn prop_known_agents_are_echoed(
            index in 0usize..2,
            repos in prop::collection::vec("\\PC{1,30}", 1..5)
        ) {
            let agent = Agent::ALL[index];
            let mut payload = valid_payload();
            payload["spec"]["agent"] = json!(agent.as_str());
            payload["spec"]["repos"] = json!(repos.clone());
            let change = validate(&payload).unwrap();
            prop_assert_eq!(change.spec.agent, agent);
            prop_assert_eq!(change.spec.repos, repos);
        }
    }
}
