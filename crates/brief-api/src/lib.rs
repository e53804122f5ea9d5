//! brief-api: HTTP client for the project intake service
//!
//! This crate speaks the intake service's JSON contract: starting a
//! conversation, forwarding requirements, requesting an estimate, sending
//! contact details and completing the conversation.

pub mod client;
pub mod error;
pub mod types;

pub use client::Client;
pub use error::{Error, Result};
pub use types::*;
