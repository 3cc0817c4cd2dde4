use clockin_core::config::{NamedColor, ThemeColor, ThemeConfig};
use ratatui::style::Color;

pub struct Theme {
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub muted: Color,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            accent: to_ratatui_color(&config.accent),
            success: to_ratatui_color(&config.success),
            error: to_ratatui_color(&config.error),
            warning: to_ratatui_color(&config.warning),
            muted: to_ratatui_color(&config.muted),
        }
    }
}

fn to_ratatui_color(color: &ThemeColor) -> Color {
    match color {
        ThemeColor::Rgb(r, g, b) => Color::Rgb(*r, *g, *b),
        ThemeColor::Named(named) => match named {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::White,
            NamedColor::Gray => Color::Gray,
            NamedColor::DarkGray => Color::DarkGray,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = Theme::from_config(&ThemeConfig::default());
        assert_eq!(theme.accent, Color::Blue);
        assert_eq!(theme.success, Color::Green);
        assert_eq!(theme.error, Color::Red);
        assert_eq!(theme.warning, Color::Yellow);
        assert_eq!(theme.muted, Color::Gray);
    }

    #[test]
    fn test_theme_custom() {
        let config = ThemeConfig {
            accent: ThemeColor::Rgb(255, 0, 255),
            error: ThemeColor::Named(NamedColor::Magenta),
            muted: ThemeColor::Named(NamedColor::DarkGray),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.accent, Color::Rgb(255, 0, 255));
        assert_eq!(theme.success, Color::Green); // default
        assert_eq!(theme.error, Color::Magenta);
        assert_eq!(theme.muted, Color::DarkGray);
    }
}
