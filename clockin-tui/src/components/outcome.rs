use super::dialog::Dialog;
use crate::theme::Theme;
use clockin_core::Screen;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Padding,
};
use std::time::Duration;

/// Whole seconds left, rounded up so the countdown never shows 0 while still visible.
pub fn seconds_left(remaining: Duration) -> u64 {
    remaining.as_millis().div_ceil(1000).try_into().unwrap_or(u64::MAX)
}

pub fn countdown_text(remaining: Duration) -> String {
    match seconds_left(remaining) {
        1 => "Returning to main screen in 1 second...".to_string(),
        n => format!("Returning to main screen in {n} seconds..."),
    }
}

/// Success or Error panel with the auto-reset countdown. Draws nothing on other screens.
pub fn draw(f: &mut Frame, area: Rect, screen: &Screen, remaining: Option<Duration>, theme: &Theme) {
    let (title, color, label, message) = match screen {
        Screen::Success { message, .. } => (" Success ", theme.success, "✓ ", message),
        Screen::Error { message, .. } => (" Error ", theme.error, "✗ ", message),
        Screen::Idle | Screen::Profile { .. } => return,
    };

    let mut lines = Vec::new();
    if let Some(staff) = screen.staff() {
        lines.push(Line::styled(
            staff.full_name(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(vec![
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(message.as_str()),
    ]));
    if let Some(remaining) = remaining {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            countdown_text(remaining),
            Style::default().fg(theme.muted),
        ));
    }

    Dialog::new(lines)
        .title(title)
        .border_color(color)
        .padding(Padding::uniform(1))
        .alignment(Alignment::Center)
        .render(f, area);
}
