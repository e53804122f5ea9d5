//! Input handling

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Processed input action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Regular character input
    Char(char),
    /// Enter/submit
    Submit,
    Backspace,
    Delete,
    Left,
    Right,
    /// Previous form field
    Up,
    /// Next form field
    Down,
    Home,
    End,
    /// Scroll transcript up
    PageUp,
    /// Scroll transcript down
    PageDown,
    /// Next input surface
    Tab,
    /// Previous input surface
    BackTab,
    Escape,
    /// Ctrl+C / Ctrl+Q
    Quit,
    /// Ctrl+R (retry connecting)
    Retry,
    /// Ctrl+U (clear line)
    ClearLine,
    /// Ctrl+W (delete word)
    DeleteWord,
    /// Bracketed paste
    Paste(String),
    /// Unknown/unhandled
    Unknown,
}

/// Convert a crossterm key event to an action
pub fn key_to_action(event: KeyEvent) -> Action {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('r') => Action::Retry,
            KeyCode::Char('u') => Action::ClearLine,
            KeyCode::Char('w') => Action::DeleteWord,
            _ => Action::Unknown,
        };
    }

    if modifiers.contains(KeyModifiers::ALT) {
        return Action::Unknown;
    }

    match code {
        KeyCode::Char(c) => Action::Char(c),
        KeyCode::Enter => Action::Submit,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => Action::BackTab,
        KeyCode::Tab => Action::Tab,
        KeyCode::BackTab => Action::BackTab,
        KeyCode::Esc => Action::Escape,
        _ => Action::Unknown,
    }
}

/// Convert a crossterm event to an action
pub fn event_to_action(event: Event) -> Option<Action> {
    match event {
        Event::Key(key_event) => Some(key_to_action(key_event)),
        Event::Paste(text) => Some(Action::Paste(text)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Action {
        key_to_action(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(key(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);
        assert_eq!(key(KeyCode::Char('r'), KeyModifiers::CONTROL), Action::Retry);
        assert_eq!(key(KeyCode::Char('x'), KeyModifiers::CONTROL), Action::Unknown);
    }

    #[test]
    fn test_tab_direction() {
        assert_eq!(key(KeyCode::Tab, KeyModifiers::NONE), Action::Tab);
        assert_eq!(key(KeyCode::Tab, KeyModifiers::SHIFT), Action::BackTab);
        assert_eq!(key(KeyCode::BackTab, KeyModifiers::SHIFT), Action::BackTab);
    }

    #[test]
    fn test_plain_chars() {
        assert_eq!(key(KeyCode::Char('a'), KeyModifiers::NONE), Action::Char('a'));
        assert_eq!(key(KeyCode::Char('A'), KeyModifiers::SHIFT), Action::Char('A'));
        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE), Action::Submit);
    }

    #[test]
    fn test_paste_event() {
        assert_eq!(
            event_to_action(Event::Paste("hi".into())),
            Some(Action::Paste("hi".into()))
        );
        assert_eq!(event_to_action(Event::FocusGained), None);
    }
}
