use crate::move_table::{pad_to_width, white_column_width, MovePair};
use crate::site::SiteStatus;
use crate::themes::Theme;
use ratatui::text::{Line, Span};
use relay_core::models::Readiness;

/// Placeholder for a query that has not resolved yet.
pub const PENDING: &str = "checking…";

// ── ConnectionIndicator ──────────────────────────────────────────────────────

/// Shows how the active tab's site is handled.
pub struct ConnectionIndicator<'a> {
    /// `None` while `getTabUrl` is still pending.
    pub status: Option<SiteStatus>,
    pub theme: &'a Theme,
}

impl<'a> ConnectionIndicator<'a> {
    pub fn new(status: Option<SiteStatus>, theme: &'a Theme) -> Self {
        Self { status, theme }
    }

    /// Format: `"Site:   Connected to chess.com"`
    pub fn to_line(&self) -> Line<'a> {
        let value = match self.status {
            Some(status) => {
                let style = match status {
                    SiteStatus::Connected => self.theme.success,
                    SiteStatus::UnsupportedFeature => self.theme.warning,
                    SiteStatus::UnsupportedSite => self.theme.error,
                };
                Span::styled(status.message(), style)
            }
            None => Span::styled(PENDING, self.theme.dim),
        };
        Line::from(vec![Span::styled("Site:   ", self.theme.label), value])
    }
}

// ── ServerIndicator ──────────────────────────────────────────────────────────

/// Shows backend readiness.
pub struct ServerIndicator<'a> {
    /// `None` while `getReadiness` is still pending.
    pub readiness: Option<Readiness>,
    pub theme: &'a Theme,
}

impl<'a> ServerIndicator<'a> {
    pub fn new(readiness: Option<Readiness>, theme: &'a Theme) -> Self {
        Self { readiness, theme }
    }

    pub fn message(readiness: Readiness) -> &'static str {
        match readiness {
            Readiness::Ready => "Server is ready",
            Readiness::NotReady => "Server is not ready",
        }
    }

    /// Format: `"Server: Server is ready"`
    pub fn to_line(&self) -> Line<'a> {
        let value = match self.readiness {
            Some(r @ Readiness::Ready) => Span::styled(Self::message(r), self.theme.success),
            Some(r @ Readiness::NotReady) => Span::styled(Self::message(r), self.theme.error),
            None => Span::styled(PENDING, self.theme.dim),
        };
        Line::from(vec![Span::styled("Server: ", self.theme.label), value])
    }
}

// ── MoveListView ─────────────────────────────────────────────────────────────

/// Ordered list of `white : black` items.
pub struct MoveListView<'a> {
    /// `None` while `getMoveList` is still pending.
    pub pairs: Option<&'a [MovePair]>,
    pub theme: &'a Theme,
}

impl<'a> MoveListView<'a> {
    pub fn new(pairs: Option<&'a [MovePair]>, theme: &'a Theme) -> Self {
        Self { pairs, theme }
    }

    /// One title line followed by one line per item, e.g. `"2. Nf3 : Nc6"`.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![Line::from(Span::styled("Moves", self.theme.label))];

        let Some(pairs) = self.pairs else {
            lines.push(Line::from(Span::styled(PENDING, self.theme.dim)));
            return lines;
        };
        if pairs.is_empty() {
            lines.push(Line::from(Span::styled("No moves yet", self.theme.dim)));
            return lines;
        }

        let width = white_column_width(pairs);
        let number_width = pairs.len().to_string().len();
        for pair in pairs {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:>number_width$}. ", pair.number),
                    self.theme.move_number,
                ),
                Span::styled(pad_to_width(pair.white_text(), width), self.theme.move_white),
                Span::styled(" : ", self.theme.dim),
                Span::styled(pair.black_text().to_string(), self.theme.move_black),
            ]));
        }
        lines
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_table::pair_moves;
    use relay_core::models::MoveList;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_connection_indicator_pending_and_resolved() {
        let theme = Theme::dark();
        let pending = ConnectionIndicator::new(None, &theme).to_line();
        assert_eq!(line_text(&pending), "Site:   checking…");

        let connected = ConnectionIndicator::new(Some(SiteStatus::Connected), &theme).to_line();
        assert_eq!(line_text(&connected), "Site:   Connected to chess.com");
        assert_eq!(connected.spans[1].style, theme.success);
    }

    #[test]
    fn test_server_indicator_messages() {
        let theme = Theme::dark();
        let ready = ServerIndicator::new(Some(Readiness::Ready), &theme).to_line();
        assert_eq!(line_text(&ready), "Server: Server is ready");

        let not_ready = ServerIndicator::new(Some(Readiness::NotReady), &theme).to_line();
        assert_eq!(line_text(&not_ready), "Server: Server is not ready");
        assert_eq!(not_ready.spans[1].style, theme.error);
    }

    #[test]
    fn test_move_list_view_items() {
        let theme = Theme::dark();
        let pairs = pair_moves(&MoveList::from(["1", "e4", "e5", "2", "Nf3", "Nc6"]));
        let lines = MoveListView::new(Some(pairs.as_slice()), &theme).to_lines();

        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[1]), "1. e4  : e5");
        assert_eq!(line_text(&lines[2]), "2. Nf3 : Nc6");
    }

    #[test]
    fn test_move_list_view_partial_item() {
        let theme = Theme::dark();
        let pairs = pair_moves(&MoveList::from(["1", "e4"]));
        let lines = MoveListView::new(Some(pairs.as_slice()), &theme).to_lines();
        assert_eq!(line_text(&lines[1]), "1. e4 : ");
    }

    #[test]
    fn test_move_list_view_empty_and_pending() {
        let theme = Theme::dark();
        let no_pairs: Vec<MovePair> = Vec::new();
        let empty = MoveListView::new(Some(no_pairs.as_slice()), &theme).to_lines();
        assert_eq!(line_text(&empty[1]), "No moves yet");

        let pending = MoveListView::new(None, &theme).to_lines();
        assert_eq!(line_text(&pending[1]), PENDING);
    }
}
