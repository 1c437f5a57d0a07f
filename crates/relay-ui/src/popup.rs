//! Point-in-time popup content.
//!
//! A [`PopupView`] starts empty on every activation and fills in as
//! [`ReportUpdate`]s arrive; sections whose query is still pending render as
//! placeholders.

use std::time::Duration;

use ratatui::text::Line;
use relay_core::models::Readiness;
use tokio::sync::mpsc;
use tokio::time;

use crate::components::header::Header;
use crate::components::indicators::{
    ConnectionIndicator, MoveListView, ServerIndicator, PENDING,
};
use crate::move_table::{pair_moves, MovePair};
use crate::reporter::ReportUpdate;
use crate::site::SiteStatus;
use crate::themes::Theme;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupView {
    pub connection: Option<SiteStatus>,
    pub readiness: Option<Readiness>,
    pub moves: Option<Vec<MovePair>>,
}

impl PopupView {
    pub fn apply(&mut self, update: ReportUpdate) {
        match update {
            ReportUpdate::Connection(status) => self.connection = Some(status),
            ReportUpdate::Server(readiness) => self.readiness = Some(readiness),
            ReportUpdate::Moves(moves) => self.moves = Some(pair_moves(&moves)),
        }
    }

    /// `true` once all three queries have answered.
    pub fn is_complete(&self) -> bool {
        self.connection.is_some() && self.readiness.is_some() && self.moves.is_some()
    }

    /// Drain `updates` into a fresh view, giving up after `timeout`.
    pub async fn collect(
        mut updates: mpsc::UnboundedReceiver<ReportUpdate>,
        timeout: Duration,
    ) -> Self {
        let mut view = Self::default();
        let drained = time::timeout(timeout, async {
            while let Some(update) = updates.recv().await {
                view.apply(update);
            }
        })
        .await;
        if drained.is_err() {
            tracing::debug!("popup snapshot incomplete after {timeout:?}");
        }
        view
    }

    /// Full popup: header, site status, server status, move list.
    pub fn to_lines<'a>(&'a self, theme: &'a Theme) -> Vec<Line<'a>> {
        let mut lines = Header::new(theme).to_lines();
        lines.push(ConnectionIndicator::new(self.connection, theme).to_line());
        lines.push(ServerIndicator::new(self.readiness, theme).to_line());
        lines.push(Line::from(""));
        lines.extend(MoveListView::new(self.moves.as_deref(), theme).to_lines());
        lines
    }

    /// Unstyled summary for log output.
    pub fn to_plain(&self) -> Vec<String> {
        let site = self.connection.map_or(PENDING, SiteStatus::message);
        let server = self.readiness.map_or(PENDING, ServerIndicator::message);
        let mut out = vec![format!("site: {site}"), format!("server: {server}")];
        match &self.moves {
            None => out.push(format!("moves: {PENDING}")),
            Some(pairs) if pairs.is_empty() => out.push("moves: none".to_string()),
            Some(pairs) => out.extend(pairs.iter().map(|p| format!("{}. {p}", p.number))),
        }
        out
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
