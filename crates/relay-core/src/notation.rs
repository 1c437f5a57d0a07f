//! Move-list text normalization.
//!
//! Turns the raw text content of the page's move-list element into a
//! [`MoveList`]: whitespace runs collapse to single separators, periods that
//! follow move numbers are dropped, and what remains is split into tokens.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::MoveList;

/// Matches move-number punctuation (`1.`, `12...`) and stray period runs.
fn period_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.+").expect("regex is valid"))
}

/// Normalize raw move-list text into tokens.
///
/// ```
/// use relay_core::notation::normalize_move_text;
///
/// let moves = normalize_move_text("1. e4  e5\n2. Nf3\tNc6");
/// assert_eq!(moves.tokens(), ["1", "e4", "e5", "2", "Nf3", "Nc6"]);
/// ```
///
/// Periods are replaced with a separator rather than deleted outright, so
/// `"1.e4"` still yields `["1", "e4"]`. Empty or whitespace-only input gives
/// an empty list.
pub fn normalize_move_text(raw: &str) -> MoveList {
    let without_periods = period_run().replace_all(raw, " ");
    without_periods
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        let moves = normalize_move_text("  1.\n\n e4 \t\t e5   ");
        assert_eq!(moves.tokens(), ["1", "e4", "e5"]);
    }

    #[test]
    fn test_normalize_strips_move_number_periods() {
        let moves = normalize_move_text("1. d4 d5 2. c4 e6");
        assert_eq!(moves.tokens(), ["1", "d4", "d5", "2", "c4", "e6"]);
    }

    #[test]
    fn test_normalize_splits_glued_move_numbers() {
        let moves = normalize_move_text("1.e4 e5 2.Nf3");
        assert_eq!(moves.tokens(), ["1", "e4", "e5", "2", "Nf3"]);
    }

    #[test]
    fn test_normalize_handles_black_to_move_ellipsis() {
        let moves = normalize_move_text("12... Qxd5");
        assert_eq!(moves.tokens(), ["12", "Qxd5"]);
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize_move_text("").is_empty());
        assert!(normalize_move_text(" \n\t ").is_empty());
        assert!(normalize_move_text("...").is_empty());
    }

    #[test]
    fn test_normalize_keeps_capture_and_check_symbols() {
        let moves = normalize_move_text("5. Bxf7+ Kxf7 6. O-O-O#");
        assert_eq!(moves.tokens(), ["5", "Bxf7+", "Kxf7", "6", "O-O-O#"]);
    }

    #[test]
    fn test_normalized_tokens_never_contain_whitespace_or_periods() {
        let moves = normalize_move_text("1.\u{a0}e4 \r\n e5 2 . Nf3");
        for token in moves.tokens() {
            assert!(!token.is_empty());
            assert!(!token.chars().any(|c| c.is_whitespace() || c == '.'));
        }
    }
}
