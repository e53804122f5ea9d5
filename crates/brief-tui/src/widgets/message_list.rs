//! Transcript widget

use crate::format::{BULLET, BotLine, bot_lines};
use crate::theme::Theme;
use crate::widgets::spinner::typing_line;
use brief_flow::{Author, Entry};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::time::Instant;

/// Widget for displaying transcript entries
pub struct MessageList<'a> {
    entries: &'a [Entry],
    theme: &'a Theme,
    scroll: usize,
    typing_since: Option<Instant>,
}

impl<'a> MessageList<'a> {
    pub fn new(entries: &'a [Entry], theme: &'a Theme) -> Self {
        Self {
            entries,
            theme,
            scroll: 0,
            typing_since: None,
        }
    }

    /// Set scroll offset
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Show the typing indicator, animated from `start`
    pub fn typing(mut self, start: Option<Instant>) -> Self {
        self.typing_since = start;
        self
    }
}

/// Lines for one entry, including the trailing separator
pub fn entry_lines(entry: &Entry, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let (header, style) = match entry.author {
        Author::Bot => ("◀ Assistant", theme.bot_header()),
        Author::User => ("▶ You", theme.user_header()),
    };
    lines.push(Line::from(vec![
        Span::styled(header, style),
        Span::styled(format!("  {}", entry.time_label()), theme.dim_style()),
    ]));

    let content_width = width.saturating_sub(2).max(1);
    match entry.author {
        Author::Bot => {
            for line in bot_lines(&entry.text) {
                match line {
                    BotLine::Text(text) => {
                        for part in textwrap::wrap(text, content_width) {
                            lines.push(Line::from(Span::styled(
                                format!("  {part}"),
                                theme.base_style(),
                            )));
                        }
                    }
                    BotLine::Bullet(text) => {
                        let wrapped = textwrap::wrap(text, content_width.saturating_sub(2).max(1));
                        for (i, part) in wrapped.iter().enumerate() {
                            let lead = if i == 0 { BULLET } else { "  " };
                            lines.push(Line::from(vec![
                                Span::styled(format!("  {lead}"), theme.accent_style()),
                                Span::styled(part.to_string(), theme.base_style()),
                            ]));
                        }
                    }
                }
            }
        }
        Author::User => {
            for part in textwrap::wrap(&entry.text, content_width) {
                lines.push(Line::from(Span::styled(
                    format!("  {part}"),
                    theme.base_style(),
                )));
            }
        }
    }

    lines.push(Line::from(""));
    lines
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;
        let mut all_lines: Vec<Line> = self
            .entries
            .iter()
            .flat_map(|entry| entry_lines(entry, self.theme, width))
            .collect();
        if let Some(start) = self.typing_since {
            all_lines.push(typing_line(start, self.theme));
        }

        let visible_lines: Vec<Line> = all_lines
            .into_iter()
            .skip(self.scroll)
            .take(area.height as usize)
            .collect();

        Paragraph::new(visible_lines).render(area, buf);
    }
}

/// Total height of the transcript at `width`
pub fn calculate_message_height(entries: &[Entry], typing: bool, width: usize) -> usize {
    let theme = Theme::dark();
    let body: usize = entries
        .iter()
        .map(|entry| entry_lines(entry, &theme, width).len())
        .sum();
    body + usize::from(typing)
}
