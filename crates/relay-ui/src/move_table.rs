//! Move list pairing.
//!
//! The coordinator's move list is a flat run of `number, white, black`
//! triples. The popup shows one ordered-list item per triple, `white : black`,
//! without the number placeholder. A trailing partial triple leaves its
//! missing entries blank.

use relay_core::models::MoveList;
use unicode_width::UnicodeWidthStr;

/// One full move: white's ply and black's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePair {
    /// 1-based position in the list.
    pub number: usize,
    pub white: Option<String>,
    pub black: Option<String>,
}

impl MovePair {
    pub fn white_text(&self) -> &str {
        self.white.as_deref().unwrap_or("")
    }

    pub fn black_text(&self) -> &str {
        self.black.as_deref().unwrap_or("")
    }
}

impl std::fmt::Display for MovePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {}", self.white_text(), self.black_text())
    }
}

/// Group tokens into triples and keep the two plies of each.
pub fn pair_moves(moves: &MoveList) -> Vec<MovePair> {
    moves
        .tokens()
        .chunks(3)
        .enumerate()
        .map(|(i, triple)| MovePair {
            number: i + 1,
            white: triple.get(1).cloned(),
            black: triple.get(2).cloned(),
        })
        .collect()
}

/// Display width of the widest white ply, for column alignment.
pub fn white_column_width(pairs: &[MovePair]) -> usize {
    pairs
        .iter()
        .map(|p| p.white_text().width())
        .max()
        .unwrap_or(0)
}

/// `text` right-padded with spaces to `width` display columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_full_triples() {
        let pairs = pair_moves(&MoveList::from(["1", "e4", "e5", "2", "Nf3", "Nc6"]));
        let items: Vec<String> = pairs.iter().map(ToString::to_string).collect();
        assert_eq!(items, ["e4 : e5", "Nf3 : Nc6"]);
        assert_eq!(pairs[1].number, 2);
    }

    #[test]
    fn test_partial_triple_leaves_black_blank() {
        let pairs = pair_moves(&MoveList::from(["1", "e4"]));
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].white_text(), "e4");
        assert_eq!(pairs[0].black, None);
        assert_eq!(pairs[0].to_string(), "e4 : ");
    }

    #[test]
    fn test_lone_move_number_renders_blank_item() {
        let pairs = pair_moves(&MoveList::from(["1", "d4", "d5", "2"]));
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].white, None);
        assert_eq!(pairs[1].black, None);
        assert_eq!(pairs[1].to_string(), " : ");
    }

    #[test]
    fn test_empty_list_has_no_items() {
        assert!(pair_moves(&MoveList::new()).is_empty());
    }

    #[test]
    fn test_white_column_width() {
        let pairs = pair_moves(&MoveList::from(["1", "e4", "e5", "2", "Bxf7+", "Kxf7"]));
        assert_eq!(white_column_width(&pairs), 5);
        assert_eq!(white_column_width(&[]), 0);
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("e4", 5), "e4   ");
        assert_eq!(pad_to_width("Bxf7+", 3), "Bxf7+");
    }
}
