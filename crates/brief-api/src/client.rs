//! Intake service client

use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    error::{Error, Result},
    types::{
        CompleteRequest, CompleteResponse, ContactInfo, ContactRequest, ConversationId,
        EstimateRequest, EstimateResponse, RequirementsRequest, StartRequest, StartResponse,
        StepResponse,
    },
};

/// Default service address for local development
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client for the intake service.
///
/// Every operation is a JSON `POST`. A non-success status or a body that does
/// not decode into the expected response is an error; there are no retries.
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::build(base_url.into(), reqwest::Client::builder())
    }

    /// Create a client whose requests fail after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::build(base_url.into(), reqwest::Client::builder().timeout(timeout))
    }

    fn build(base_url: String, builder: reqwest::ClientBuilder) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::InvalidUrl(base_url));
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Base URL requests are sent to (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Open a new conversation
    pub async fn start(&self) -> Result<StartResponse> {
        self.post("/start", &StartRequest {}).await
    }

    /// Forward free-text requirements
    pub async fn collect_requirements(
        &self,
        conversation_id: &ConversationId,
        user_input: &str,
    ) -> Result<StepResponse> {
        let body = RequirementsRequest {
            conversation_id,
            user_input,
        };
        self.post("/collect-requirements", &body).await
    }

    /// Ask the service for the project estimate
    pub async fn generate_estimate(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<EstimateResponse> {
        self.post("/generate-estimate", &EstimateRequest { conversation_id })
            .await
    }

    /// Send the visitor's contact details
    pub async fn collect_contact(
        &self,
        conversation_id: &ConversationId,
        contact: &ContactInfo,
    ) -> Result<StepResponse> {
        let body = ContactRequest {
            conversation_id,
            contact,
        };
        self.post("/collect-contact", &body).await
    }

    /// Complete the conversation with optional final notes
    pub async fn complete(
        &self,
        conversation_id: &ConversationId,
        final_notes: Option<&str>,
    ) -> Result<CompleteResponse> {
        let body = CompleteRequest {
            conversation_id,
            final_notes,
        };
        self.post("/complete", &body).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!("{} returned {}", path, status);
            return Err(Error::status(status.as_u16(), text));
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("Malformed response from {}: {}", path, e);
            Error::Decode(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Estimate, StepId};
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    async fn client_for(server: &MockServer) -> Client {
        Client::new(server.uri()).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = Client::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_base_url_requires_scheme() {
        assert!(matches!(
            Client::new("localhost:8000"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_start_sends_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "conversation_id": "c1",
                "current_step": "collecting_requirements",
                "message": "Hi!"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = client_for(&server).await.start().await.unwrap();
        assert_eq!(resp.conversation_id, ConversationId::new("c1"));
        assert_eq!(resp.current_step, StepId::CollectingRequirements);
        assert_eq!(resp.message, "Hi!");
    }

    #[tokio::test]
    async fn test_collect_requirements_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collect-requirements"))
            .and(body_json(json!({
                "conversation_id": "c1",
                "user_input": "I need a mobile app"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_step": "generating_estimate",
                "message": "Great!"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = client_for(&server)
            .await
            .collect_requirements(&ConversationId::new("c1"), "I need a mobile app")
            .await
            .unwrap();
        assert_eq!(resp.current_step, StepId::GeneratingEstimate);
    }

    #[tokio::test]
    async fn test_generate_estimate_parses_estimate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate-estimate"))
            .and(body_json(json!({"conversation_id": "c1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_step": "collecting_contact",
                "message": "Estimate ready",
                "estimate": {
                    "timeline": "8-12 weeks",
                    "budget_range": "$15,000-$25,000",
                    "complexity": "Medium"
                }
            })))
            .mount(&server)
            .await;

        let resp = client_for(&server)
            .await
            .generate_estimate(&ConversationId::new("c1"))
            .await
            .unwrap();
        assert_eq!(
            resp.estimate,
            Estimate {
                timeline: "8-12 weeks".into(),
                budget_range: "$15,000-$25,000".into(),
                complexity: "Medium".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_collect_contact_nests_contact() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collect-contact"))
            .and(body_json(json!({
                "conversation_id": "c1",
                "contact": {"name": "Ana", "email": "a@b.com", "phone": "555-0100"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_step": "confirmation",
                "message": "Thanks Ana"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let contact = ContactInfo {
            name: "Ana".into(),
            email: "a@b.com".into(),
            phone: "555-0100".into(),
        };
        let resp = client_for(&server)
            .await
            .collect_contact(&ConversationId::new("c1"), &contact)
            .await
            .unwrap();
        assert_eq!(resp.current_step, StepId::Confirmation);
    }

    #[tokio::test]
    async fn test_complete_sends_null_for_missing_notes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/complete"))
            .and(body_json(json!({"conversation_id": "c1", "final_notes": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Submitted",
                "status": "completed"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = client_for(&server)
            .await
            .complete(&ConversationId::new("c1"), None)
            .await
            .unwrap();
        assert_eq!(resp.reported_step(), Some(StepId::Completed));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collect-requirements"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Conversation not found"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .collect_requirements(&ConversationId::new("gone"), "hello")
            .await
            .unwrap_err();
        match err {
            Error::Status { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("Conversation not found"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.start().await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_missing_fields_is_error_not_partial_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Hi!"})))
            .mount(&server)
            .await;

        let err = client_for(&server).await.start().await.unwrap_err();
        assert!(err.is_protocol());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() {
        // Port 9 (discard) on localhost is not expected to accept connections
        let client = Client::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.start().await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
