//! Core data model shared by the observer, coordinator, and reporter.

use serde::{Deserialize, Serialize};

// ── MoveList ─────────────────────────────────────────────────────────────────

/// Ordered move tokens in ply order, as last extracted from the page.
///
/// Move-number placeholders are kept as their own tokens (`"1"`, `"2"`, ...),
/// so a well-formed list is a run of `number, white, black` triples. The list
/// is always replaced wholesale; there is no incremental diffing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveList(Vec<String>);

impl MoveList {
    /// An empty move list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of tokens, placeholders included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the tokens.
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Consume the list, returning the raw tokens.
    pub fn into_tokens(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for MoveList {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl<const N: usize> From<[&str; N]> for MoveList {
    fn from(tokens: [&str; N]) -> Self {
        Self(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl FromIterator<String> for MoveList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── Readiness ────────────────────────────────────────────────────────────────

/// Backend readiness as last observed by the probe.
///
/// Starts at [`Readiness::NotReady`] and flips freely on every probe result;
/// there is no hysteresis or back-off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Readiness {
    #[default]
    NotReady,
    Ready,
}

impl Readiness {
    pub fn is_ready(self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

impl From<bool> for Readiness {
    fn from(ready: bool) -> Self {
        if ready {
            Readiness::Ready
        } else {
            Readiness::NotReady
        }
    }
}

impl std::fmt::Display for Readiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Readiness::Ready => write!(f, "ready"),
            Readiness::NotReady => write!(f, "not ready"),
        }
    }
}

// ── SharedState ──────────────────────────────────────────────────────────────

/// The single piece of state the coordinator owns.
///
/// Only the coordinator task ever holds a `SharedState`; everything else sees
/// copies handed out through the message protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedState {
    pub move_list: MoveList,
    pub readiness: Readiness,
}

// ── RelayRequest ─────────────────────────────────────────────────────────────

/// Body of `POST <base>/update_moves`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub moves: MoveList,
    #[serde(rename = "gameid")]
    pub game_id: String,
}

impl RelayRequest {
    pub fn new(moves: MoveList, game_id: impl Into<String>) -> Self {
        Self {
            moves,
            game_id: game_id.into(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
