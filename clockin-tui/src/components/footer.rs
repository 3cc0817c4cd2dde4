use crate::theme::Theme;
use clockin_core::Screen;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Key hints for `screen`, as (key, label) pairs.
pub fn hints(screen: &Screen, busy: bool) -> &'static [(&'static str, &'static str)] {
    if busy {
        return &[("ctrl+c", "quit")];
    }
    match screen {
        Screen::Idle => &[("enter", "verify"), ("esc", "clear"), ("ctrl+c", "quit")],
        Screen::Profile { .. } => &[
            ("i", "time in"),
            ("o", "time out"),
            ("esc", "cancel"),
        ],
        Screen::Success { .. } => &[("enter", "return now")],
        Screen::Error { .. } => &[("enter", "try again")],
    }
}

pub fn draw(f: &mut Frame, area: Rect, screen: &Screen, busy: bool, theme: &Theme) {
    let mut spans = Vec::new();
    for (i, (key, label)) in hints(screen, busy).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(theme.muted)));
        }
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(": {label}"),
            Style::default().fg(theme.muted),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_only_offers_quit() {
        assert_eq!(hints(&Screen::Idle, true), &[("ctrl+c", "quit")]);
    }

    #[test]
    fn test_error_offers_retry() {
        let screen = Screen::Error {
            staff: None,
            message: "x".into(),
        };
        assert_eq!(hints(&screen, false), &[("enter", "try again")]);
    }
}
