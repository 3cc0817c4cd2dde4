use crate::theme::Theme;
use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

pub const CLOCK_FORMAT: &str = "%I:%M:%S %p";
pub const DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Title bar with the running clock on the right.
pub fn draw(f: &mut Frame, area: Rect, title: &str, clock: DateTime<Local>, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.muted));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let time = clock.format(CLOCK_FORMAT).to_string();
    let time_width = u16::try_from(time.len()).unwrap_or(u16::MAX);
    let [title_area, time_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(time_width)]).areas(inner);

    f.render_widget(
        Paragraph::new(Line::styled(
            title,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        title_area,
    );
    f.render_widget(
        Paragraph::new(Line::styled(time, Style::default().fg(theme.muted)))
            .alignment(Alignment::Right),
        time_area,
    );
}
