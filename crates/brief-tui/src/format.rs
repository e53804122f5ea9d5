//! Bot message formatting
//!
//! Bot text is plain text with two conventions: a newline followed by `- `
//! starts a bullet item, and any other newline is a line break. Nothing else
//! in the text is interpreted.

/// One display line of a bot message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotLine<'a> {
    Text(&'a str),
    Bullet(&'a str),
}

/// Bullet glyph shown in place of `- `
pub const BULLET: &str = "• ";

/// Split bot text into display lines
pub fn bot_lines(text: &str) -> Vec<BotLine<'_>> {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            match line.strip_prefix("- ") {
                // A leading "- " with no newline before it is literal text
                Some(item) if i > 0 => BotLine::Bullet(item),
                _ => BotLine::Text(line),
            }
        })
        .collect()
}

/// Bot text with bullets substituted, for plain terminal output
pub fn bot_plain(text: &str) -> String {
    bot_lines(text)
        .into_iter()
        .map(|line| match line {
            BotLine::Text(t) => t.to_string(),
            BotLine::Bullet(t) => format!("{BULLET}{t}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullets_and_breaks() {
        let lines = bot_lines("Here's the plan:\n- Design\n- Build\nThanks");
        assert_eq!(
            lines,
            vec![
                BotLine::Text("Here's the plan:"),
                BotLine::Bullet("Design"),
                BotLine::Bullet("Build"),
                BotLine::Text("Thanks"),
            ]
        );
    }

    #[test]
    fn test_leading_dash_is_literal() {
        assert_eq!(bot_lines("- not a bullet"), vec![BotLine::Text("- not a bullet")]);
    }

    #[test]
    fn test_dash_without_space_is_text() {
        assert_eq!(
            bot_lines("a\n-b"),
            vec![BotLine::Text("a"), BotLine::Text("-b")]
        );
    }

    #[test]
    fn test_markup_is_not_interpreted() {
        assert_eq!(bot_plain("<b>hi</b>\n- <i>x</i>"), "<b>hi</b>\n• <i>x</i>");
    }

    #[test]
    fn test_blank_lines_kept() {
        assert_eq!(bot_plain("a\n\n- b"), "a\n\n• b");
    }
}
