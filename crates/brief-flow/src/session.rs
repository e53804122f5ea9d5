//! Session state mirrored from the service

use brief_api::{ConversationId, Estimate, StepId};

/// What the client knows about the current conversation.
///
/// Lives for one run of the client and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct ConversationSession {
    conversation_id: Option<ConversationId>,
    current_step: StepId,
    estimate: Option<Estimate>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation_id(&self) -> Option<&ConversationId> {
        self.conversation_id.as_ref()
    }

    pub fn current_step(&self) -> &StepId {
        &self.current_step
    }

    pub fn estimate(&self) -> Option<&Estimate> {
        self.estimate.as_ref()
    }

    /// Whether `start` has succeeded
    pub fn is_started(&self) -> bool {
        self.conversation_id.is_some()
    }

    /// Bind the conversation id. The first id wins; later ones are ignored.
    pub(crate) fn bind(&mut self, id: ConversationId) -> bool {
        if let Some(existing) = &self.conversation_id {
            tracing::warn!(
                "Ignoring conversation id {} (already bound to {})",
                id,
                existing
            );
            return false;
        }
        tracing::info!("Conversation {} started", id);
        self.conversation_id = Some(id);
        true
    }

    /// Overwrite the current step, returning the previous one
    pub(crate) fn set_step(&mut self, step: StepId) -> StepId {
        std::mem::replace(&mut self.current_step, step)
    }

    pub(crate) fn hold_estimate(&mut self, estimate: Estimate) {
        self.estimate = Some(estimate);
    }
}
