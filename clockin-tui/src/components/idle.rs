use super::{centered_fixed_rect, dialog_width, header, input_field, spinner_frame};
use crate::theme::Theme;
use clockin_core::Kiosk;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub const BUSY_MESSAGE: &str = "Verifying...";
const PROMPT: &str = "Scan or type your National ID, then press Enter";

/// Clock, date and the identifier field.
pub fn draw(f: &mut Frame, area: Rect, kiosk: &Kiosk, theme: &Theme, elapsed_ms: u128) {
    let panel = centered_fixed_rect(dialog_width(area.width), 11, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(panel);
    f.render_widget(block, panel);

    let [clock_area, date_area, _, prompt_area, input_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    let clock = kiosk.clock();
    f.render_widget(
        Paragraph::new(Line::styled(
            clock.format(header::CLOCK_FORMAT).to_string(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        clock_area,
    );
    f.render_widget(
        Paragraph::new(Line::styled(
            clock.format(header::DATE_FORMAT).to_string(),
            Style::default().fg(theme.muted),
        ))
        .alignment(Alignment::Center),
        date_area,
    );
    f.render_widget(
        Paragraph::new(Line::raw(PROMPT)).alignment(Alignment::Center),
        prompt_area,
    );

    input_field::draw(f, input_area, kiosk.input(), !kiosk.is_busy(), theme);

    let status = if kiosk.is_busy() {
        Line::from(vec![
            Span::styled(
                format!("{} ", spinner_frame(elapsed_ms)),
                Style::default().fg(theme.accent),
            ),
            Span::raw(BUSY_MESSAGE),
        ])
    } else if let Some(notice) = kiosk.message() {
        Line::styled(notice, Style::default().fg(theme.warning))
    } else {
        Line::raw("")
    };
    f.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        status_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_util::{render, test_theme};
    use chrono::{Local, TimeZone};
    use std::time::Instant;

    fn kiosk() -> Kiosk {
        let wall = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        Kiosk::new(Instant::now(), wall)
    }

    #[test]
    fn test_idle_shows_clock_date_and_placeholder() {
        let theme = test_theme();
        let kiosk = kiosk();
        let output = render(80, 14, |f| draw(f, f.area(), &kiosk, &theme, 0));
        assert!(output.contains("02:07:09 PM"), "{output}");
        assert!(output.contains("Tuesday, March 5, 2024"), "{output}");
        assert!(output.contains(input_field::PLACEHOLDER), "{output}");
    }

    #[test]
    fn test_idle_shows_typed_identifier() {
        let theme = test_theme();
        let mut kiosk = kiosk();
        if let Some(input) = kiosk.input_mut() {
            for c in "12345678".chars() {
                input.insert(c);
            }
        }
        let output = render(80, 14, |f| draw(f, f.area(), &kiosk, &theme, 0));
        assert!(output.contains("12345678"));
        assert!(!output.contains(input_field::PLACEHOLDER));
    }

    #[test]
    fn test_idle_shows_empty_input_notice() {
        let theme = test_theme();
        let mut kiosk = kiosk();
        assert!(kiosk.submit("  ").is_none());
        let output = render(80, 14, |f| draw(f, f.area(), &kiosk, &theme, 0));
        assert!(output.contains("Please enter National ID"), "{output}");
    }

    #[test]
    fn test_idle_shows_busy_indicator() {
        let theme = test_theme();
        let mut kiosk = kiosk();
        assert!(kiosk.submit("12345678").is_some());
        let output = render(80, 14, |f| draw(f, f.area(), &kiosk, &theme, 0));
        assert!(output.contains(BUSY_MESSAGE), "{output}");
    }
}
