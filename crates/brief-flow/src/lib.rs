//! brief-flow: Conversation state machine for the intake client
//!
//! This crate owns the dialogue: the session mirrored from the service, the
//! transcript, which inputs are enabled and which panel is shown. The
//! [`ConversationMachine`] is synchronous and hands back [`Request`] values;
//! [`Flow`] drives it against a [`Transport`].

pub mod error;
pub mod flow;
pub mod forms;
pub mod machine;
pub mod request;
pub mod session;
pub mod transcript;
pub mod transport;
pub mod view;

pub use error::{Error, Result};
pub use flow::{Flow, Outcome};
pub use machine::{ConversationMachine, FlowConfig, Resolved};
pub use request::{Operation, Reply, Request};
pub use session::ConversationSession;
pub use transcript::{Author, Entry, Transcript};
pub use transport::Transport;
pub use view::{Control, Controls, Panel, Summary};

pub use brief_api::{ContactInfo, ConversationId, Estimate, StepId};
