use crate::theme::Theme;
use clockin_core::input::InputBuffer;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub const PLACEHOLDER: &str = "Enter your National ID";

/// Byte range of the text that fits in the field, plus the cursor column within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct VisibleSlice {
    start: usize,
    end: usize,
    cursor_col: u16,
}

fn visible_slice(text: &str, cursor_pos: usize, max_width: u16) -> VisibleSlice {
    if max_width == 0 || text.is_empty() {
        return VisibleSlice {
            start: 0,
            end: 0,
            cursor_col: 0,
        };
    }

    let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
    let mut boundaries: Vec<usize> = graphemes.iter().map(|(i, _)| *i).collect();
    boundaries.push(text.len());

    let boundary_idx = match boundaries.binary_search(&cursor_pos.min(text.len())) {
        Ok(idx) => idx,
        Err(idx) => idx.saturating_sub(1),
    };

    let mut prefix_widths = Vec::with_capacity(boundaries.len());
    prefix_widths.push(0);
    let mut width = 0;
    for (_, grapheme) in &graphemes {
        width += grapheme.width();
        prefix_widths.push(width);
    }

    // Keep the cursor inside the field by scrolling the start forward
    let max_width = usize::from(max_width);
    let max_cursor_col = max_width.saturating_sub(1);
    let scroll_col = prefix_widths[boundary_idx].saturating_sub(max_cursor_col);
    let start_index = prefix_widths
        .iter()
        .take_while(|&&col| col <= scroll_col)
        .count()
        .saturating_sub(1)
        .min(graphemes.len().saturating_sub(1));

    let mut end_index = start_index;
    let mut visible_width = 0;
    while let Some((_, grapheme)) = graphemes.get(end_index) {
        if visible_width + grapheme.width() > max_width {
            break;
        }
        visible_width += grapheme.width();
        end_index += 1;
    }

    let cursor_col = (prefix_widths[boundary_idx] - prefix_widths[start_index]).min(max_cursor_col);
    VisibleSlice {
        start: boundaries[start_index],
        end: boundaries[end_index],
        cursor_col: u16::try_from(cursor_col).unwrap_or(u16::MAX),
    }
}

/// Render the identifier field. The terminal cursor is only shown while `editable`.
pub fn draw(f: &mut Frame, area: Rect, input: &InputBuffer, editable: bool, theme: &Theme) {
    let border = if editable { theme.accent } else { theme.muted };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    let text = input.as_str();

    let (content, cursor_col) = if text.is_empty() {
        let placeholder = Line::from(Span::styled(PLACEHOLDER, Style::default().fg(theme.muted)));
        (placeholder, 0)
    } else {
        let slice = visible_slice(text, input.cursor(), inner.width);
        (
            Line::from(Span::raw(&text[slice.start..slice.end])),
            slice.cursor_col,
        )
    };
    f.render_widget(Paragraph::new(content).block(block), area);

    if editable && inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((inner.x.saturating_add(cursor_col), inner.y));
    }
}
