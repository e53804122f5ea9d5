//! The conversation state machine
//!
//! The machine decides what to send and how to react to replies, but never
//! sends anything itself. Every user action returns a [`Request`] (or
//! nothing, when it was handled locally). The caller sends it and feeds the
//! outcome back through [`ConversationMachine::resolve`]. Delayed reactions
//! are kept as timers that the caller fires with [`ConversationMachine::tick`].

use brief_api::{ConversationId, StepId};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::forms;
use crate::request::{Operation, Reply, Request};
use crate::session::ConversationSession;
use crate::transcript::Transcript;
use crate::view::{Control, Controls, Panel, Summary};

const CONTACT_FORM_PROMPT: &str =
    "Please fill out the contact form below to receive your detailed estimate.";
const SUBMITTED_NOTICE: &str = "Your information has been submitted successfully!";

/// Timing knobs for the machine
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Pause before the contact form appears after the estimate
    pub contact_reveal_delay: Duration,
    /// How long chat stays disabled after a locally handled message
    pub local_reenable_delay: Duration,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            contact_reveal_delay: Duration::from_millis(1000),
            local_reenable_delay: Duration::from_millis(500),
        }
    }
}

/// What to do after a reply has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Send this follow-up request without waiting for the user
    Continue(Request),
    /// Nothing left to send
    Done,
    /// The call failed; an apology is in the transcript and inputs are back
    /// to where they were
    Failed(Operation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    EnableChat,
    RevealContact,
}

#[derive(Debug)]
struct InFlight {
    operation: Operation,
    /// Controls as they were before the call began
    restore: Controls,
    contact: Option<brief_api::ContactInfo>,
}

/// Client-side conversation state.
///
/// At most one request is outstanding at a time; while it is, every input is
/// disabled and the transcript shows the typing indicator.
#[derive(Debug)]
pub struct ConversationMachine {
    config: FlowConfig,
    session: ConversationSession,
    transcript: Transcript,
    controls: Controls,
    panel: Panel,
    summary: Option<Summary>,
    in_flight: Option<InFlight>,
    timers: Vec<(Instant, Deferred)>,
    completed: bool,
    reveal: Option<Panel>,
}

impl ConversationMachine {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config,
            session: ConversationSession::new(),
            transcript: Transcript::new(),
            controls: Controls::none(),
            panel: Panel::Chat,
            summary: None,
            in_flight: None,
            timers: Vec::new(),
            completed: false,
            reveal: None,
        }
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// The operation currently awaiting a reply
    pub fn in_flight(&self) -> Option<Operation> {
        self.in_flight.as_ref().map(|f| f.operation)
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The panel most recently revealed, if not yet taken. The UI uses this
    /// to scroll the new panel into view once.
    pub fn take_reveal(&mut self) -> Option<Panel> {
        self.reveal.take()
    }

    /// Earliest pending timer
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|(at, _)| *at).min()
    }

    // ── User actions ────────────────────────────────────────────────────────

    /// Open the conversation
    pub fn begin_start(&mut self) -> Result<Request> {
        if self.in_flight.is_some() {
            return Err(Error::Busy);
        }
        if self.session.is_started() {
            return Err(Error::AlreadyStarted);
        }
        Ok(self.begin(Request::Start, None))
    }

    /// Submit a chat message.
    ///
    /// Returns `Ok(None)` when the message was answered locally because the
    /// current step is driven by the panels rather than by chat.
    pub fn submit_message(&mut self, raw: &str, now: Instant) -> Result<Option<Request>> {
        let conversation_id = self.ready(Control::Chat)?;
        let text = forms::chat_text(raw).ok_or(Error::EmptyMessage)?;
        self.transcript.push_user(text.clone());

        let step = self.session.current_step().clone();
        if step.is_ui_driven() {
            return Ok(self.answer_locally(&step, conversation_id, now));
        }
        Ok(Some(self.begin(
            Request::CollectRequirements {
                conversation_id,
                user_input: text,
            },
            None,
        )))
    }

    /// Submit the contact form
    pub fn submit_contact(&mut self, name: &str, email: &str, phone: &str) -> Result<Request> {
        let conversation_id = self.ready(Control::Contact)?;
        let contact = forms::contact_info(name, email, phone)?;
        Ok(self.begin(
            Request::CollectContact {
                conversation_id,
                contact: contact.clone(),
            },
            Some(contact),
        ))
    }

    /// Submit the final notes form; blank notes are sent as absent
    pub fn submit_notes(&mut self, raw: &str) -> Result<Request> {
        let conversation_id = self.ready(Control::Notes)?;
        Ok(self.begin(
            Request::Complete {
                conversation_id,
                final_notes: forms::final_notes(raw),
            },
            None,
        ))
    }

    // ── Replies and timers ──────────────────────────────────────────────────

    /// Apply the outcome of the request currently in flight
    pub fn resolve(&mut self, result: brief_api::Result<Reply>, now: Instant) -> Resolved {
        let Some(flight) = self.in_flight.take() else {
            tracing::warn!("Dropping reply with no request in flight");
            return Resolved::Done;
        };

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => return self.fail(flight, &e.to_string()),
        };

        match (flight.operation, reply) {
            (Operation::Start, Reply::Started(r)) => {
                self.session.bind(r.conversation_id);
                self.advance(r.current_step);
                self.transcript.push_bot(r.message);
                self.controls = flight.restore;
                self.controls.chat = true;
                Resolved::Done
            }
            (Operation::CollectRequirements, Reply::Step(r)) => {
                self.transcript.push_bot(r.message);
                self.advance(r.current_step);
                self.controls = flight.restore;
                if *self.session.current_step() == StepId::GeneratingEstimate {
                    if let Some(conversation_id) = self.session.conversation_id().cloned() {
                        return Resolved::Continue(
                            self.begin(Request::GenerateEstimate { conversation_id }, None),
                        );
                    }
                }
                self.controls.chat = true;
                Resolved::Done
            }
            (Operation::GenerateEstimate, Reply::Estimate(r)) => {
                self.transcript.push_bot(r.message);
                self.session.hold_estimate(r.estimate);
                self.advance(r.current_step);
                self.controls = flight.restore;
                self.controls.chat = true;
                if *self.session.current_step() == StepId::CollectingContact {
                    self.schedule(now + self.config.contact_reveal_delay, Deferred::RevealContact);
                }
                Resolved::Done
            }
            (Operation::CollectContact, Reply::Step(r)) => {
                self.transcript.push_bot(r.message);
                self.advance(r.current_step);
                self.controls = flight.restore;
                self.controls.contact = false;
                self.controls.notes = true;
                if let Some(contact) = flight.contact {
                    self.summary = Some(Summary {
                        contact,
                        estimate: self.session.estimate().cloned(),
                        notice: None,
                    });
                }
                self.show(Panel::Summary);
                Resolved::Done
            }
            (Operation::Complete, Reply::Completed(r)) => {
                self.transcript.push_bot(r.message.clone());
                if let Some(step) = r.reported_step() {
                    self.advance(step);
                }
                self.controls = Controls::none();
                self.completed = true;
                if let Some(summary) = &mut self.summary {
                    summary.notice = Some(SUBMITTED_NOTICE.to_string());
                }
                tracing::info!("Conversation completed");
                Resolved::Done
            }
            (_, reply) => {
                let reason = format!("unexpected reply {reply:?}");
                self.fail(flight, &reason)
            }
        }
    }

    /// Fire every timer due at or before `now`
    pub fn tick(&mut self, now: Instant) {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|(at, _)| *at <= now);
        self.timers = pending;
        due.sort_by_key(|(at, _)| *at);

        for (_, deferred) in due {
            if self.completed {
                continue;
            }
            match deferred {
                Deferred::EnableChat => self.live_controls().chat = true,
                Deferred::RevealContact => {
                    if self.summary.is_some() {
                        continue;
                    }
                    self.live_controls().contact = true;
                    self.show(Panel::Contact);
                }
            }
        }
    }

    // ── Internals ───────────────────────────────────────────────────────────

    /// Check that `control` may be used now and return the conversation id
    fn ready(&self, control: Control) -> Result<ConversationId> {
        if self.in_flight.is_some() {
            return Err(Error::Busy);
        }
        let conversation_id = self.session.conversation_id().ok_or(Error::NotStarted)?;
        if !self.controls.is_enabled(control) {
            return Err(Error::InputDisabled(control));
        }
        Ok(conversation_id.clone())
    }

    fn begin(&mut self, request: Request, contact: Option<brief_api::ContactInfo>) -> Request {
        let restore = std::mem::replace(&mut self.controls, Controls::none());
        self.transcript.show_typing();
        self.in_flight = Some(InFlight {
            operation: request.operation(),
            restore,
            contact,
        });
        request
    }

    fn fail(&mut self, flight: InFlight, reason: &str) -> Resolved {
        tracing::warn!("{} failed: {}", flight.operation, reason);
        self.transcript.hide_typing();
        self.transcript.push_bot(flight.operation.apology());
        self.controls = flight.restore;
        Resolved::Failed(flight.operation)
    }

    /// Handle chat in a step driven by the panels without asking the service
    /// for requirements. The one exception is `generating_estimate` with no
    /// estimate held: the forced estimate call failed, and re-sending it is
    /// the only way the user can retry.
    fn answer_locally(
        &mut self,
        step: &StepId,
        conversation_id: ConversationId,
        now: Instant,
    ) -> Option<Request> {
        match step {
            StepId::GeneratingEstimate if self.session.estimate().is_none() => {
                tracing::debug!("No estimate held yet, asking again");
                Some(self.begin(Request::GenerateEstimate { conversation_id }, None))
            }
            StepId::CollectingContact => {
                self.transcript.push_bot(CONTACT_FORM_PROMPT);
                self.pause_chat(now);
                None
            }
            _ => {
                self.pause_chat(now);
                None
            }
        }
    }

    fn pause_chat(&mut self, now: Instant) {
        self.controls.chat = false;
        self.schedule(now + self.config.local_reenable_delay, Deferred::EnableChat);
    }

    fn schedule(&mut self, at: Instant, deferred: Deferred) {
        self.timers.push((at, deferred));
    }

    /// Controls a timer should change: the restore snapshot while a call is
    /// pending, so the change survives the call, else the live set.
    fn live_controls(&mut self) -> &mut Controls {
        match &mut self.in_flight {
            Some(flight) => &mut flight.restore,
            None => &mut self.controls,
        }
    }

    fn advance(&mut self, step: StepId) {
        let previous = self.session.set_step(step);
        if previous != *self.session.current_step() {
            tracing::debug!("Step {} -> {}", previous, self.session.current_step());
        }
    }

    fn show(&mut self, panel: Panel) {
        if self.panel != panel {
            self.panel = panel;
            self.reveal = Some(panel);
        }
    }
}
