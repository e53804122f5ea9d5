//! Wire types for the intake service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque conversation identifier issued by the service on `start`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dialogue step as reported by the service.
///
/// The service is the source of truth for steps and may introduce new ones,
/// so unrecognized values are kept verbatim in [`StepId::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StepId {
    #[default]
    Greeting,
    CollectingRequirements,
    GeneratingEstimate,
    CollectingContact,
    Confirmation,
    Completed,
    Other(String),
}

impl StepId {
    /// Wire name of this step
    pub fn as_str(&self) -> &str {
        match self {
            StepId::Greeting => "greeting",
            StepId::CollectingRequirements => "collecting_requirements",
            StepId::GeneratingEstimate => "generating_estimate",
            StepId::CollectingContact => "collecting_contact",
            StepId::Confirmation => "confirmation",
            StepId::Completed => "completed",
            StepId::Other(s) => s,
        }
    }

    /// Steps where the expected input comes from the UI rather than free text
    pub fn is_ui_driven(&self) -> bool {
        matches!(self, StepId::CollectingContact | StepId::GeneratingEstimate)
    }
}

impl From<String> for StepId {
    fn from(s: String) -> Self {
        match s.as_str() {
            "greeting" => StepId::Greeting,
            "collecting_requirements" => StepId::CollectingRequirements,
            "generating_estimate" => StepId::GeneratingEstimate,
            "collecting_contact" => StepId::CollectingContact,
            "confirmation" => StepId::Confirmation,
            "completed" => StepId::Completed,
            _ => StepId::Other(s),
        }
    }
}

impl From<&str> for StepId {
    fn from(s: &str) -> Self {
        StepId::from(s.to_string())
    }
}

impl From<StepId> for String {
    fn from(step: StepId) -> Self {
        match step {
            StepId::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preliminary project estimate computed by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    pub timeline: String,
    pub budget_range: String,
    pub complexity: String,
}

/// Contact details entered by the visitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

// ── Request bodies ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct StartRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct RequirementsRequest<'a> {
    pub conversation_id: &'a ConversationId,
    pub user_input: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct EstimateRequest<'a> {
    pub conversation_id: &'a ConversationId,
}

#[derive(Debug, Serialize)]
pub(crate) struct ContactRequest<'a> {
    pub conversation_id: &'a ConversationId,
    pub contact: &'a ContactInfo,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompleteRequest<'a> {
    pub conversation_id: &'a ConversationId,
    /// Serialized as `null` when absent, never omitted
    pub final_notes: Option<&'a str>,
}

// ── Response bodies ─────────────────────────────────────────────────────────

/// Response to `start`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartResponse {
    pub conversation_id: ConversationId,
    pub current_step: StepId,
    pub message: String,
}

/// Response to `collect-requirements` and `collect-contact`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StepResponse {
    pub current_step: StepId,
    pub message: String,
}

/// Response to `generate-estimate`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EstimateResponse {
    pub current_step: StepId,
    pub message: String,
    pub estimate: Estimate,
}

/// Response to `complete`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompleteResponse {
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub current_step: Option<StepId>,
}

impl CompleteResponse {
    /// Step reported by the service, falling back to its `status` field
    pub fn reported_step(&self) -> Option<StepId> {
        self.current_step
            .clone()
            .or_else(|| self.status.as_deref().map(StepId::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_steps_parse() {
        let step: StepId = serde_json::from_value(json!("collecting_contact")).unwrap();
        assert_eq!(step, StepId::CollectingContact);
        assert!(step.is_ui_driven());
    }

    #[test]
    fn test_unknown_step_kept_verbatim() {
        let step: StepId = serde_json::from_value(json!("reviewing_scope")).unwrap();
        assert_eq!(step, StepId::Other("reviewing_scope".into()));
        assert!(!step.is_ui_driven());
        assert_eq!(serde_json::to_value(&step).unwrap(), json!("reviewing_scope"));
    }

    #[test]
    fn test_complete_request_serializes_null_notes() {
        let id = ConversationId::new("c1");
        let body = CompleteRequest {
            conversation_id: &id,
            final_notes: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"conversation_id": "c1", "final_notes": null})
        );
    }

    #[test]
    fn test_complete_response_step_falls_back_to_status() {
        let resp: CompleteResponse =
            serde_json::from_value(json!({"message": "Thanks", "status": "completed"})).unwrap();
        assert_eq!(resp.reported_step(), Some(StepId::Completed));

        let bare: CompleteResponse = serde_json::from_value(json!({"message": "Thanks"})).unwrap();
        assert_eq!(bare.reported_step(), None);
    }

    #[test]
    fn test_estimate_response_requires_estimate() {
        let result = serde_json::from_value::<EstimateResponse>(json!({
            "current_step": "collecting_contact",
            "message": "Here you go"
        }));
        assert!(result.is_err());
    }
}
