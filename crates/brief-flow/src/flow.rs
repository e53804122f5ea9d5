//! Async driver that runs the machine against a transport

use brief_api::StepId;
use std::sync::Arc;
use std::time::Instant;

use crate::error::Result;
use crate::machine::{ConversationMachine, FlowConfig, Resolved};
use crate::request::{Operation, Request};
use crate::transport::Transport;

/// How a user action ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Answered locally without calling the service
    Local,
    /// Every request it led to succeeded; the conversation is now at this step
    Settled(StepId),
    /// This operation failed and the apology is in the transcript
    Failed(Operation),
}

/// Owns a machine and a transport and performs each action to completion,
/// including any follow-up request the machine chains on.
pub struct Flow {
    machine: ConversationMachine,
    transport: Arc<dyn Transport>,
}

impl Flow {
    pub fn new(config: FlowConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            machine: ConversationMachine::new(config),
            transport,
        }
    }

    pub fn machine(&self) -> &ConversationMachine {
        &self.machine
    }

    /// Open the conversation
    pub async fn start(&mut self) -> Result<Outcome> {
        let request = self.machine.begin_start()?;
        Ok(self.drive(request).await)
    }

    /// Send a chat message
    pub async fn send_message(&mut self, text: &str) -> Result<Outcome> {
        let now = Instant::now();
        self.machine.tick(now);
        match self.machine.submit_message(text, now)? {
            Some(request) => Ok(self.drive(request).await),
            None => Ok(Outcome::Local),
        }
    }

    /// Submit contact details
    pub async fn submit_contact(&mut self, name: &str, email: &str, phone: &str) -> Result<Outcome> {
        self.machine.tick(Instant::now());
        let request = self.machine.submit_contact(name, email, phone)?;
        Ok(self.drive(request).await)
    }

    /// Finish the conversation with optional notes
    pub async fn complete(&mut self, notes: &str) -> Result<Outcome> {
        self.machine.tick(Instant::now());
        let request = self.machine.submit_notes(notes)?;
        Ok(self.drive(request).await)
    }

    /// Wait out every pending timer
    pub async fn settle(&mut self) {
        while let Some(deadline) = self.machine.next_deadline() {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
            self.machine.tick(Instant::now());
        }
    }

    async fn drive(&mut self, mut request: Request) -> Outcome {
        loop {
            let result = request.send(self.transport.as_ref()).await;
            match self.machine.resolve(result, Instant::now()) {
                Resolved::Continue(next) => request = next,
                Resolved::Done => {
                    return Outcome::Settled(self.machine.session().current_step().clone());
                }
                Resolved::Failed(operation) => return Outcome::Failed(operation),
            }
        }
    }
}
