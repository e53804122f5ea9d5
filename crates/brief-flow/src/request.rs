//! Requests the machine asks to have sent, and the replies it expects back

use brief_api::{
    CompleteResponse, ContactInfo, ConversationId, EstimateResponse, StartResponse, StepResponse,
};
use std::fmt;

use crate::transport::Transport;

/// The service operation behind a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Start,
    CollectRequirements,
    GenerateEstimate,
    CollectContact,
    Complete,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Start => "start",
            Operation::CollectRequirements => "collect-requirements",
            Operation::GenerateEstimate => "generate-estimate",
            Operation::CollectContact => "collect-contact",
            Operation::Complete => "complete",
        }
    }

    /// Bot line appended to the transcript when this operation fails
    pub fn apology(&self) -> &'static str {
        match self {
            Operation::Start => "Error connecting to the chatbot service. Please try again.",
            Operation::CollectRequirements => {
                "Sorry, there was an error processing your message. Please try again."
            }
            Operation::GenerateEstimate => {
                "Sorry, there was an error generating your estimate. Please try again."
            }
            Operation::CollectContact => {
                "Sorry, there was an error submitting your contact information. Please try again."
            }
            Operation::Complete => {
                "Sorry, there was an error submitting your information. Please try again."
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A call the machine wants made. Built only by the machine, which has
/// already checked the preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Start,
    CollectRequirements {
        conversation_id: ConversationId,
        user_input: String,
    },
    GenerateEstimate {
        conversation_id: ConversationId,
    },
    CollectContact {
        conversation_id: ConversationId,
        contact: ContactInfo,
    },
    Complete {
        conversation_id: ConversationId,
        final_notes: Option<String>,
    },
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::Start => Operation::Start,
            Request::CollectRequirements { .. } => Operation::CollectRequirements,
            Request::GenerateEstimate { .. } => Operation::GenerateEstimate,
            Request::CollectContact { .. } => Operation::CollectContact,
            Request::Complete { .. } => Operation::Complete,
        }
    }

    /// Perform the call. Does not touch the machine, so the caller can keep
    /// rendering while this is pending.
    pub async fn send(&self, transport: &dyn Transport) -> brief_api::Result<Reply> {
        tracing::debug!("Sending {}", self.operation());
        let reply = match self {
            Request::Start => Reply::Started(transport.start().await?),
            Request::CollectRequirements {
                conversation_id,
                user_input,
            } => Reply::Step(
                transport
                    .collect_requirements(conversation_id, user_input)
                    .await?,
            ),
            Request::GenerateEstimate { conversation_id } => {
                Reply::Estimate(transport.generate_estimate(conversation_id).await?)
            }
            Request::CollectContact {
                conversation_id,
                contact,
            } => Reply::Step(transport.collect_contact(conversation_id, contact).await?),
            Request::Complete {
                conversation_id,
                final_notes,
            } => Reply::Completed(
                transport
                    .complete(conversation_id, final_notes.as_deref())
                    .await?,
            ),
        };
        Ok(reply)
    }
}

/// A decoded service reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Started(StartResponse),
    Step(StepResponse),
    Estimate(EstimateResponse),
    Completed(CompleteResponse),
}
