//! Input surfaces and panels

use brief_api::{ContactInfo, Estimate};
use std::fmt;

/// An input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Chat,
    Contact,
    Notes,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Control::Chat => "Chat",
            Control::Contact => "Contact form",
            Control::Notes => "Notes",
        })
    }
}

/// Which input surfaces currently accept input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub chat: bool,
    pub contact: bool,
    pub notes: bool,
}

impl Controls {
    /// Everything disabled
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::Chat => self.chat,
            Control::Contact => self.contact,
            Control::Notes => self.notes,
        }
    }
}

/// Panel shown alongside the chat transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// Chat only
    #[default]
    Chat,
    /// Contact form
    Contact,
    /// Summary with the final-notes form
    Summary,
}

/// What was collected, shown once contact details are accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub contact: ContactInfo,
    pub estimate: Option<Estimate>,
    /// Set once the conversation is completed
    pub notice: Option<String>,
}

/// A titled group of label/value rows
pub type SummarySection<'a> = (&'static str, Vec<(&'static str, &'a str)>);

impl Summary {
    /// The notes form is hidden after completion
    pub fn notes_form_visible(&self) -> bool {
        self.notice.is_none()
    }

    /// Rows to display, grouped by section
    pub fn sections(&self) -> Vec<SummarySection<'_>> {
        let mut sections = vec![(
            "Contact Information",
            vec![
                ("Name", self.contact.name.as_str()),
                ("Email", self.contact.email.as_str()),
                ("Phone", self.contact.phone.as_str()),
            ],
        )];
        if let Some(estimate) = &self.estimate {
            sections.push((
                "Estimated Project Details",
                vec![
                    ("Timeline", estimate.timeline.as_str()),
                    ("Budget Range", estimate.budget_range.as_str()),
                    ("Complexity", estimate.complexity.as_str()),
                ],
            ));
        }
        sections
    }
}
