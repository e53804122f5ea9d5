//! Summary card shown after contact details are accepted

use crate::theme::Theme;
use brief_flow::Summary;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct SummaryCard<'a> {
    summary: &'a Summary,
    theme: &'a Theme,
}

impl<'a> SummaryCard<'a> {
    pub fn new(summary: &'a Summary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        for (i, (title, rows)) in self.summary.sections().into_iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                title,
                self.theme.accent_style().add_modifier(Modifier::BOLD),
            )));
            for (label, value) in rows {
                lines.push(Line::from(vec![
                    Span::styled(format!("{label}: "), self.theme.dim_style()),
                    Span::styled(value, self.theme.base_style()),
                ]));
            }
        }
        if let Some(notice) = &self.summary.notice {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                notice.as_str(),
                self.theme.success_style().add_modifier(Modifier::BOLD),
            )));
        }
        lines
    }

    /// Rows needed to draw the card without wrapping, borders included
    pub fn height(&self) -> u16 {
        self.lines().len() as u16 + 2
    }
}

impl Widget for SummaryCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Summary ");
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
