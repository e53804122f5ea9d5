//! Error types for brief-flow

use thiserror::Error;

use crate::view::Control;

/// Result type alias using brief-flow Error
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a user action is refused before any request is made.
///
/// Transport failures are not errors at this level: they are reported in the
/// transcript and surface as [`crate::Outcome::Failed`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No conversation has been opened yet
    #[error("Conversation has not started")]
    NotStarted,

    /// `start` was requested for a live conversation
    #[error("Conversation already started")]
    AlreadyStarted,

    /// Another request is still outstanding
    #[error("Still waiting for the previous request")]
    Busy,

    /// The input surface is not accepting input right now
    #[error("{0} input is disabled")]
    InputDisabled(Control),

    /// Chat message was blank after trimming
    #[error("Message is empty")]
    EmptyMessage,

    /// A required contact field was blank
    #[error("Please fill in your {0}")]
    MissingContactField(&'static str),
}
