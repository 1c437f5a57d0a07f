use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are considered dark; 7–15 are considered light. Absent or unparseable
/// values fall back to dark.
pub fn detect_background() -> BackgroundType {
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from_colorfgbg(value: Option<&str>) -> BackgroundType {
    value
        .and_then(|v| v.split(';').next_back())
        .and_then(|bg| bg.parse::<u8>().ok())
        .map(|bg| {
            if bg <= 6 {
                BackgroundType::Dark
            } else {
                BackgroundType::Light
            }
        })
        .unwrap_or(BackgroundType::Dark)
}

/// Styles used by the popup components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_piece: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Moves ────────────────────────────────────────────────────────────────
    pub move_number: Style,
    pub move_white: Style,
    pub move_black: Style,
}

impl Theme {
    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_piece: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            move_number: Style::default().fg(Color::DarkGray),
            move_white: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            move_black: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_piece: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            move_number: Style::default().fg(Color::Gray),
            move_white: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            move_black: Style::default().fg(Color::DarkGray),
        }
    }

    /// Resolve a theme by name; `"auto"` and unknown names follow the
    /// detected terminal background.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => match detect_background() {
                BackgroundType::Light => Self::light(),
                BackgroundType::Dark => Self::dark(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(background_from_colorfgbg(Some("15;0")), BackgroundType::Dark);
        assert_eq!(background_from_colorfgbg(Some("0;15")), BackgroundType::Light);
        assert_eq!(background_from_colorfgbg(Some("garbage")), BackgroundType::Dark);
        assert_eq!(background_from_colorfgbg(None), BackgroundType::Dark);
    }

    #[test]
    fn test_from_name_explicit() {
        assert_eq!(Theme::from_name("light").value.fg, Some(Color::Black));
        assert_eq!(Theme::from_name("dark").value.fg, Some(Color::White));
    }
}
