use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Idle and profile screen accent (default: "blue").
    #[serde(
        default = "ThemeConfig::default_accent",
        deserialize_with = "deserialize_color"
    )]
    pub accent: ThemeColor,
    /// Success screen and time-in button (default: "green").
    #[serde(
        default = "ThemeConfig::default_success",
        deserialize_with = "deserialize_color"
    )]
    pub success: ThemeColor,
    /// Error screen, inline notices and time-out button (default: "red").
    #[serde(
        default = "ThemeConfig::default_error",
        deserialize_with = "deserialize_color"
    )]
    pub error: ThemeColor,
    /// Busy indicator (default: "yellow").
    #[serde(
        default = "ThemeConfig::default_warning",
        deserialize_with = "deserialize_color"
    )]
    pub warning: ThemeColor,
    /// Labels, hints and placeholders (default: "gray").
    #[serde(
        default = "ThemeConfig::default_muted",
        deserialize_with = "deserialize_color"
    )]
    pub muted: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: Self::default_accent(),
            success: Self::default_success(),
            error: Self::default_error(),
            warning: Self::default_warning(),
            muted: Self::default_muted(),
        }
    }
}

impl ThemeConfig {
    fn default_accent() -> ThemeColor {
        ThemeColor::Named(NamedColor::Blue)
    }
    fn default_success() -> ThemeColor {
        ThemeColor::Named(NamedColor::Green)
    }
    fn default_error() -> ThemeColor {
        ThemeColor::Named(NamedColor::Red)
    }
    fn default_warning() -> ThemeColor {
        ThemeColor::Named(NamedColor::Yellow)
    }
    fn default_muted() -> ThemeColor {
        ThemeColor::Named(NamedColor::Gray)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    DarkGray,
}

impl NamedColor {
    const ALL: [(&'static str, NamedColor); 10] = [
        ("black", NamedColor::Black),
        ("blue", NamedColor::Blue),
        ("cyan", NamedColor::Cyan),
        ("dark_gray", NamedColor::DarkGray),
        ("gray", NamedColor::Gray),
        ("green", NamedColor::Green),
        ("magenta", NamedColor::Magenta),
        ("red", NamedColor::Red),
        ("white", NamedColor::White),
        ("yellow", NamedColor::Yellow),
    ];

    pub fn as_str(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(_, c)| *c == self)
            .map_or("white", |(name, _)| name)
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(n) => f.write_str(n.as_str()),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl Serialize for ThemeColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl ThemeColor {
    /// Parse a named color (`grey`/`dark_grey` accepted) or a `#rrggbb` hex triple.
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Self::Rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        let lower = s.trim().to_lowercase().replace("grey", "gray");
        NamedColor::ALL
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, color)| Self::Named(*color))
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<ThemeColor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ThemeColor::parse(&s).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid color '{s}': expected a named color (black, red, green, yellow, blue, magenta, cyan, white, gray, dark_gray) or hex (#rrggbb)"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_and_aliases() {
        assert_eq!(ThemeColor::parse("Red"), Some(ThemeColor::Named(NamedColor::Red)));
        assert_eq!(ThemeColor::parse("grey"), Some(ThemeColor::Named(NamedColor::Gray)));
        assert_eq!(
            ThemeColor::parse("dark_grey"),
            Some(ThemeColor::Named(NamedColor::DarkGray))
        );
        assert_eq!(ThemeColor::parse("chartreuse"), None);
    }

    #[test]
    fn parse_hex() {
        assert_eq!(ThemeColor::parse("#1e90ff"), Some(ThemeColor::Rgb(30, 144, 255)));
        assert_eq!(ThemeColor::parse("#12345"), None);
        assert_eq!(ThemeColor::parse("#zzzzzz"), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for color in [ThemeColor::Named(NamedColor::DarkGray), ThemeColor::Rgb(1, 2, 255)] {
            assert_eq!(ThemeColor::parse(&color.to_string()), Some(color));
        }
    }
}
