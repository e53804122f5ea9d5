//! The three input surfaces and keyboard focus between them

use brief_flow::{Controls, Panel};
use brief_tui::input::Action;
use brief_tui::widgets::InputBox;

/// Contact form field names, in display order
pub const CONTACT_FIELDS: [&str; 3] = ["name", "email", "phone"];

/// Which input has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Chat,
    /// Index into [`CONTACT_FIELDS`]
    Contact(usize),
    Notes,
}

pub struct Forms {
    pub chat: InputBox,
    pub contact: [InputBox; 3],
    pub notes: InputBox,
    focus: Focus,
    contact_visible: bool,
    notes_visible: bool,
}

impl Default for Forms {
    fn default() -> Self {
        Self::new()
    }
}

impl Forms {
    pub fn new() -> Self {
        let mut forms = Self {
            chat: InputBox::new()
                .with_title("Message")
                .with_placeholder("Type your message..."),
            contact: [
                InputBox::new()
                    .with_title("Name")
                    .with_placeholder("Your name"),
                InputBox::new()
                    .with_title("Email")
                    .with_placeholder("you@example.com"),
                InputBox::new()
                    .with_title("Phone")
                    .with_placeholder("Phone number"),
            ],
            notes: InputBox::new()
                .with_title("Additional notes (optional)")
                .with_placeholder("Anything else we should know?"),
            focus: Focus::Chat,
            contact_visible: false,
            notes_visible: false,
        };
        forms.apply_focus();
        forms
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn contact_visible(&self) -> bool {
        self.contact_visible
    }

    pub fn notes_visible(&self) -> bool {
        self.notes_visible
    }

    /// Mirror enabled state and visibility from the machine
    pub fn sync(&mut self, controls: Controls, panel: Panel, notes_form_visible: bool) {
        self.chat.set_enabled(controls.chat);
        for field in &mut self.contact {
            field.set_enabled(controls.contact);
        }
        self.notes.set_enabled(controls.notes);

        self.contact_visible = panel == Panel::Contact;
        self.notes_visible = panel == Panel::Summary && notes_form_visible;
        if !self.is_visible(self.focus) {
            self.focus = Focus::Chat;
        }
        self.apply_focus();
    }

    /// Move focus to the surface belonging to a newly shown panel
    pub fn focus_panel(&mut self, panel: Panel) {
        let target = match panel {
            Panel::Chat => Focus::Chat,
            Panel::Contact => Focus::Contact(0),
            Panel::Summary => Focus::Notes,
        };
        if self.is_visible(target) {
            self.focus = target;
            self.apply_focus();
        }
    }

    /// Focus a contact field by name
    pub fn focus_contact_field(&mut self, field: &str) {
        if let Some(i) = CONTACT_FIELDS.iter().position(|f| *f == field) {
            if self.contact_visible {
                self.focus = Focus::Contact(i);
                self.apply_focus();
            }
        }
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.step_focus(-1);
    }

    /// Move between contact fields without leaving the form
    pub fn step_contact_field(&mut self, delta: isize) -> bool {
        let Focus::Contact(i) = self.focus else {
            return false;
        };
        let n = CONTACT_FIELDS.len() as isize;
        self.focus = Focus::Contact((i as isize + delta).rem_euclid(n) as usize);
        self.apply_focus();
        true
    }

    pub fn contact_values(&self) -> [String; 3] {
        [0, 1, 2].map(|i| self.contact[i].content().to_string())
    }

    /// Send an editing action to the focused input
    pub fn handle_edit(&mut self, action: &Action, width: u16) -> bool {
        let input = match self.focus {
            Focus::Chat => &mut self.chat,
            Focus::Contact(i) => &mut self.contact[i],
            Focus::Notes => &mut self.notes,
        };
        input.handle_action(action, width)
    }

    fn ring(&self) -> Vec<Focus> {
        let mut ring = vec![Focus::Chat];
        if self.contact_visible {
            ring.extend((0..CONTACT_FIELDS.len()).map(Focus::Contact));
        }
        if self.notes_visible {
            ring.push(Focus::Notes);
        }
        ring
    }

    fn step_focus(&mut self, delta: isize) {
        let ring = self.ring();
        let current = ring.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(ring.len() as isize) as usize;
        self.focus = ring[next];
        self.apply_focus();
    }

    fn is_visible(&self, focus: Focus) -> bool {
        match focus {
            Focus::Chat => true,
            Focus::Contact(_) => self.contact_visible,
            Focus::Notes => self.notes_visible,
        }
    }

    fn apply_focus(&mut self) {
        self.chat.set_focused(self.focus == Focus::Chat);
        for (i, field) in self.contact.iter_mut().enumerate() {
            field.set_focused(self.focus == Focus::Contact(i));
        }
        self.notes.set_focused(self.focus == Focus::Notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_enabled() -> Controls {
        Controls {
            chat: true,
            contact: true,
            notes: true,
        }
    }

    fn type_into(forms: &mut Forms, text: &str) {
        for c in text.chars() {
            forms.handle_edit(&Action::Char(c), 80);
        }
    }

    #[test]
    fn test_tab_cycles_visible_surfaces() {
        let mut forms = Forms::new();
        forms.focus_next();
        assert_eq!(forms.focus(), Focus::Chat);

        forms.sync(all_enabled(), Panel::Contact, false);
        forms.focus_next();
        assert_eq!(forms.focus(), Focus::Contact(0));
        forms.focus_next();
        forms.focus_next();
        assert_eq!(forms.focus(), Focus::Contact(2));
        forms.focus_next();
        assert_eq!(forms.focus(), Focus::Chat);
        forms.focus_prev();
        assert_eq!(forms.focus(), Focus::Contact(2));
    }

    #[test]
    fn test_reveal_moves_focus() {
        let mut forms = Forms::new();
        forms.sync(all_enabled(), Panel::Contact, false);
        forms.focus_panel(Panel::Contact);
        assert_eq!(forms.focus(), Focus::Contact(0));
        assert!(forms.contact[0].is_focused());
        assert!(!forms.chat.is_focused());
    }

    #[test]
    fn test_hidden_focus_falls_back_to_chat() {
        let mut forms = Forms::new();
        forms.sync(all_enabled(), Panel::Summary, true);
        forms.focus_panel(Panel::Summary);
        assert_eq!(forms.focus(), Focus::Notes);

        forms.sync(Controls::none(), Panel::Summary, false);
        assert_eq!(forms.focus(), Focus::Chat);
    }

    #[test]
    fn test_edits_go_to_focused_field() {
        let mut forms = Forms::new();
        forms.sync(all_enabled(), Panel::Contact, false);
        forms.focus_panel(Panel::Contact);
        type_into(&mut forms, "Ana");
        forms.step_contact_field(1);
        type_into(&mut forms, "a@b.com");
        forms.step_contact_field(1);
        type_into(&mut forms, "555");
        assert_eq!(forms.contact_values(), ["Ana", "a@b.com", "555"]);
        assert_eq!(forms.chat.content(), "");
    }

    #[test]
    fn test_focus_contact_field_by_name() {
        let mut forms = Forms::new();
        forms.sync(all_enabled(), Panel::Contact, false);
        forms.focus_contact_field("phone");
        assert_eq!(forms.focus(), Focus::Contact(2));
        assert!(forms.step_contact_field(1));
        assert_eq!(forms.focus(), Focus::Contact(0));
    }

    #[test]
    fn test_disabled_chat_ignores_typing() {
        let mut forms = Forms::new();
        forms.sync(Controls::none(), Panel::Chat, false);
        type_into(&mut forms, "hi");
        assert_eq!(forms.chat.content(), "");
    }
}
