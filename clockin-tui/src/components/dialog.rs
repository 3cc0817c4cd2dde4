use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::{centered_fixed_rect, dialog_width};

/// A centered bordered panel whose height follows its word-wrapped content.
pub struct Dialog<'a> {
    lines: Vec<Line<'a>>,
    border_color: Color,
    title: Option<&'a str>,
    padding: Padding,
    alignment: Alignment,
}

impl<'a> Dialog<'a> {
    #[must_use]
    pub fn new(lines: Vec<Line<'a>>) -> Self {
        Self {
            lines,
            border_color: Color::White,
            title: None,
            padding: Padding::ZERO,
            alignment: Alignment::Left,
        }
    }

    #[must_use]
    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    fn h_chrome(&self) -> u16 {
        2 + self.padding.left + self.padding.right
    }

    fn v_chrome(&self) -> u16 {
        2 + self.padding.top + self.padding.bottom
    }

    /// `(width, height)` for this panel given the terminal width.
    pub fn size(&self, terminal_width: u16) -> (u16, u16) {
        let width = dialog_width(terminal_width);
        let text_width = width.saturating_sub(self.h_chrome()).max(1);

        let content_height: u16 = self
            .lines
            .iter()
            .map(|line| word_wrapped_line_count(line, text_width))
            .sum();

        (width, content_height + self.v_chrome())
    }

    /// Render centered on `area`, clearing the background first.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let (width, height) = self.size(area.width);
        let centered = centered_fixed_rect(width, height, area);

        f.render_widget(Clear, centered);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .padding(self.padding);

        if let Some(title) = self.title {
            block = block.title(title);
        }

        let paragraph = Paragraph::new(self.lines.clone())
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(self.alignment);

        f.render_widget(paragraph, centered);
    }
}

/// Visual line count of `line` once word-wrapped to `max_width` columns.
pub fn word_wrapped_line_count(line: &Line, max_width: u16) -> u16 {
    let max_w = usize::from(max_width);
    if max_w == 0 {
        return 1;
    }

    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    if text.is_empty() {
        return 1;
    }

    let mut lines: u16 = 1;
    let mut col: usize = 0;

    for (i, word) in text.split(' ').enumerate() {
        let w = word.width();
        let needed = if i == 0 || col == 0 { w } else { w + 1 };

        if col + needed <= max_w {
            col += needed;
        } else if w <= max_w {
            lines += 1;
            col = w;
        } else {
            if col > 0 {
                lines += 1;
            }
            col = w;
            while col > max_w {
                lines += 1;
                col -= max_w;
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Span;

    #[test]
    fn test_word_wrap_fits_on_one_line() {
        let line = Line::raw("Welcome Grace!");
        assert_eq!(word_wrapped_line_count(&line, 20), 1);
        assert_eq!(word_wrapped_line_count(&line, 14), 1);
    }

    #[test]
    fn test_word_wrap_breaks_at_word_boundary() {
        let line = Line::raw("Staff not found. Please contact administrator.");
        assert_eq!(word_wrapped_line_count(&line, 20), 3);
    }

    #[test]
    fn test_word_wrap_oversized_word() {
        let line = Line::raw("abcdefghij");
        assert_eq!(word_wrapped_line_count(&line, 4), 3);
    }

    #[test]
    fn test_word_wrap_counts_display_width() {
        // Each ideograph is two columns wide
        let line = Line::raw("出勤記録");
        assert_eq!(word_wrapped_line_count(&line, 4), 2);
    }

    #[test]
    fn test_word_wrap_empty_and_zero_width() {
        assert_eq!(word_wrapped_line_count(&Line::raw(""), 20), 1);
        assert_eq!(word_wrapped_line_count(&Line::raw("x"), 0), 1);
    }

    #[test]
    fn test_word_wrap_multi_span_line() {
        let line = Line::from(vec![Span::raw("Total hours: "), Span::raw("8.00")]);
        assert_eq!(word_wrapped_line_count(&line, 20), 1);
        assert_eq!(word_wrapped_line_count(&line, 12), 2);
    }

    #[test]
    fn test_dialog_size_includes_chrome() {
        let dialog = Dialog::new(vec![Line::raw("Verifying...")]);
        assert_eq!(dialog.size(100), (64, 3));

        let padded = Dialog::new(vec![Line::raw("one"), Line::raw(""), Line::raw("three")])
            .padding(Padding::uniform(1));
        assert_eq!(padded.size(100), (64, 7));
    }

    #[test]
    fn test_dialog_grows_for_long_messages() {
        let long = "attendance ".repeat(20);
        let dialog = Dialog::new(vec![Line::raw(long.trim())]).padding(Padding::uniform(1));
        let (_w, h) = dialog.size(60);
        assert!(h > 5, "should wrap, height={h}");
    }

    #[test]
    fn test_dialog_builder() {
        let dialog = Dialog::new(vec![Line::raw("test")])
            .border_color(Color::Red)
            .title(" Error ")
            .alignment(Alignment::Center);
        assert_eq!(dialog.border_color, Color::Red);
        assert_eq!(dialog.title, Some(" Error "));
        assert_eq!(dialog.alignment, Alignment::Center);
    }
}
