use ratatui::layout::Rect;

pub mod dialog;
pub mod footer;
pub mod header;
pub mod idle;
pub mod input_field;
pub mod outcome;
pub mod profile;

/// Braille spinner shown while a backend request is in flight
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(elapsed_ms: u128) -> &'static str {
    let len = SPINNER_FRAMES.len() as u128;
    let idx = usize::try_from((elapsed_ms / 80) % len).unwrap_or(0);
    SPINNER_FRAMES[idx]
}

/// Center a rect of fixed size, clamped to the available area
pub fn centered_fixed_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

/// Panels take most of a narrow terminal but stop growing on wide ones.
pub fn dialog_width(terminal_width: u16) -> u16 {
    (terminal_width.saturating_mul(4) / 5).clamp(terminal_width.min(20), 64)
}
