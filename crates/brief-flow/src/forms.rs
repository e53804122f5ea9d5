//! Validation for the three input surfaces

use brief_api::ContactInfo;

use crate::error::{Error, Result};

/// Chat text to send, or `None` when blank
pub fn chat_text(raw: &str) -> Option<String> {
    let text = raw.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Build contact details; all three fields are required.
///
/// Only presence is checked. Formats are left to the service.
pub fn contact_info(name: &str, email: &str, phone: &str) -> Result<ContactInfo> {
    let name = required("name", name)?;
    let email = required("email", email)?;
    let phone = required("phone", phone)?;
    Ok(ContactInfo { name, email, phone })
}

/// Final notes, where blank input means "no notes" rather than `""`
pub fn final_notes(raw: &str) -> Option<String> {
    chat_text(raw)
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::MissingContactField(field));
    }
    Ok(value.to_string())
}
