use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Knight glyphs placed either side of the title.
pub const KNIGHT: &str = "♞";

/// Popup header: title, a 40-column `=` separator, and an empty line.
pub struct Header<'a> {
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Render the header as exactly three lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(vec![
                Span::styled(KNIGHT, self.theme.header_piece),
                Span::styled(" CHESS RELAY ", self.theme.header),
                Span::styled(KNIGHT, self.theme.header_piece),
            ]),
            Line::from(Span::styled("=".repeat(40), self.theme.separator)),
            Line::from(""),
        ]
    }
}
