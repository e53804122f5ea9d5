//! Append-only chat transcript

use chrono::{DateTime, Local};

/// Who wrote a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    Bot,
    User,
}

/// A single transcript entry
#[derive(Debug, Clone)]
pub struct Entry {
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl Entry {
    /// Wall-clock label shown next to the entry
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Ordered chat entries plus the typing indicator.
///
/// Entries are never edited or removed. The typing indicator is a flag, not
/// an entry, so there is at most one and it goes away as soon as the next
/// bot entry lands.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    typing: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Append a bot entry, clearing the typing indicator
    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.typing = false;
        self.push(Author::Bot, text.into());
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Author::User, text.into());
    }

    pub fn show_typing(&mut self) {
        self.typing = true;
    }

    pub fn hide_typing(&mut self) {
        self.typing = false;
    }

    fn push(&mut self, author: Author, text: String) {
        self.entries.push(Entry {
            author,
            text,
            timestamp: Local::now(),
        });
    }
}
