use crate::render::{Markup, Role, Span};
use unicode_width::UnicodeWidthStr;

/// A bordered panel with a title inset in its top edge, sized to its content.
///
/// ```text
/// ╭─ title ───╮
/// │ body text │
/// ╰───────────╯
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub title: Markup,
    pub body: Markup,
}

impl Block {
    pub fn new(title: Markup, body: Markup) -> Self {
        Self { title, body }
    }

    /// Body split into lines on embedded newlines.
    fn lines(&self) -> Vec<Vec<Span>> {
        let mut lines = vec![Vec::new()];
        for span in self.body.spans() {
            let mut pieces = span.text.split('\n');
            if let Some(first) = pieces.next() {
                push_piece(&mut lines, span.role, first);
            }
            for piece in pieces {
                lines.push(Vec::new());
                push_piece(&mut lines, span.role, piece);
            }
        }
        lines
    }

    /// Lays the block out, styling every span with `style`.
    pub fn layout(&self, style: impl Fn(&Span) -> String) -> String {
        let lines = self.lines();

        let title_width = self.title.width();
        let body_width = lines.iter().map(|l| line_width(l)).max().unwrap_or(0);
        let inner = if title_width > 0 {
            body_width.max(title_width + 2)
        } else {
            body_width
        };

        let mut out = String::new();
        if title_width > 0 {
            let title: String = self.title.spans().iter().map(&style).collect();
            out.push_str("╭─ ");
            out.push_str(&title);
            out.push(' ');
            out.push_str(&"─".repeat(inner - title_width - 1));
            out.push_str("╮\n");
        } else {
            out.push('╭');
            out.push_str(&"─".repeat(inner + 2));
            out.push_str("╮\n");
        }

        for line in &lines {
            let text: String = line.iter().map(&style).collect();
            out.push_str("│ ");
            out.push_str(&text);
            out.push_str(&" ".repeat(inner - line_width(line)));
            out.push_str(" │\n");
        }

        out.push('╰');
        out.push_str(&"─".repeat(inner + 2));
        out.push('╯');
        out
    }

    /// Layout without any styling.
    pub fn plain(&self) -> String {
        self.layout(|s| s.text.clone())
    }
}

fn line_width(line: &[Span]) -> usize {
    line.iter().map(|s| s.text.width()).sum()
}

fn push_piece(lines: &mut [Vec<Span>], role: Role, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(line) = lines.last_mut() {
        line.push(Span {
            role,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_layout_with_title() {
        let block = Block::new(
            Markup::styled(Role::Title, "Daisy"),
            Markup::styled(Role::FunctionName, "sq(x) | half(x)"),
        );
        let expected = "\
╭─ Daisy ─────────╮
│ sq(x) | half(x) │
╰─────────────────╯";
        assert_eq!(block.plain(), expected);
    }

    #[test]
    fn test_layout_title_wider_than_body() {
        let block = Block::new(
            Markup::styled(Role::Title, "a long title"),
            Markup::styled(Role::Plain, "f"),
        );
        let rendered = block.plain();
        let widths: Vec<usize> = rendered.lines().map(|l| l.width()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
        assert!(rendered.starts_with("╭─ a long title ─╮"));
    }

    #[test]
    fn test_layout_without_title_and_multiline() {
        let block = Block::new(Markup::new(), Markup::styled(Role::Plain, "ab\nc"));
        let expected = "\
╭────╮
│ ab │
│ c  │
╰────╯";
        assert_eq!(block.plain(), expected);
    }
}
