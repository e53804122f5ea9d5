//! Transport abstraction for talking to the intake service
//!
//! The machine never performs I/O itself. A [`Transport`] is what
//! [`crate::Request::send`] calls, so tests can script replies without a
//! network.

use async_trait::async_trait;
use brief_api::{
    Client, CompleteResponse, ContactInfo, ConversationId, EstimateResponse, Result,
    StartResponse, StepResponse,
};

/// The five service operations
#[async_trait]
pub trait Transport: Send + Sync {
    async fn start(&self) -> Result<StartResponse>;

    async fn collect_requirements(
        &self,
        conversation_id: &ConversationId,
        user_input: &str,
    ) -> Result<StepResponse>;

    async fn generate_estimate(&self, conversation_id: &ConversationId)
    -> Result<EstimateResponse>;

    async fn collect_contact(
        &self,
        conversation_id: &ConversationId,
        contact: &ContactInfo,
    ) -> Result<StepResponse>;

    async fn complete(
        &self,
        conversation_id: &ConversationId,
        final_notes: Option<&str>,
    ) -> Result<CompleteResponse>;
}

#[async_trait]
impl Transport for Client {
    async fn start(&self) -> Result<StartResponse> {
        Client::start(self).await
    }

    async fn collect_requirements(
        &self,
        conversation_id: &ConversationId,
        user_input: &str,
    ) -> Result<StepResponse> {
        Client::collect_requirements(self, conversation_id, user_input).await
    }

    async fn generate_estimate(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<EstimateResponse> {
        Client::generate_estimate(self, conversation_id).await
    }

    async fn collect_contact(
        &self,
        conversation_id: &ConversationId,
        contact: &ContactInfo,
    ) -> Result<StepResponse> {
        Client::collect_contact(self, conversation_id, contact).await
    }

    async fn complete(
        &self,
        conversation_id: &ConversationId,
        final_notes: Option<&str>,
    ) -> Result<CompleteResponse> {
        Client::complete(self, conversation_id, final_notes).await
    }
}
