use super::{dialog::Dialog, spinner_frame};
use crate::theme::Theme;
use clockin_core::StaffRecord;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Padding,
};

pub const BUSY_MESSAGE: &str = "Recording attendance...";

fn field<'a>(label: &'a str, value: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(theme.muted)),
        Span::raw(value),
    ])
}

fn action<'a>(key: &'a str, label: &'a str, color: Color) -> Vec<Span<'a>> {
    vec![
        Span::styled(
            format!("[{key}] "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(label, Style::default().fg(color)),
    ]
}

/// Verified staff details with the time in / time out choice.
pub fn draw(
    f: &mut Frame,
    area: Rect,
    staff: &StaffRecord,
    busy: bool,
    photo_base: Option<&str>,
    theme: &Theme,
    elapsed_ms: u128,
) {
    // Terminals can't show the picture itself
    let avatar = match photo_base.and_then(|base| staff.photo_url(base)) {
        Some(url) => Line::styled(format!("Photo: {url}"), Style::default().fg(theme.muted)),
        None => Line::styled(
            format!("[ {} ]", staff.initials()),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let actions = if busy {
        Line::from(vec![
            Span::styled(
                format!("{} ", spinner_frame(elapsed_ms)),
                Style::default().fg(theme.accent),
            ),
            Span::raw(BUSY_MESSAGE),
        ])
    } else {
        let mut spans = action("I", "TIME IN", theme.success);
        spans.push(Span::raw("   "));
        spans.extend(action("O", "TIME OUT", theme.error));
        spans.push(Span::raw("   "));
        spans.extend(action("Esc", "Cancel", theme.muted));
        Line::from(spans)
    };

    let lines = vec![
        avatar,
        Line::styled(
            staff.full_name(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        field("Staff ID", &staff.staff_id, theme),
        field("National ID", &staff.national_id, theme),
        field("Department", staff.department_label(), theme),
        field("Position", staff.position_label(), theme),
        Line::raw(""),
        actions,
    ];

    Dialog::new(lines)
        .title(" Staff Profile ")
        .border_color(theme.accent)
        .padding(Padding::horizontal(1))
        .alignment(Alignment::Center)
        .render(f, area);
}
