//! Opening book keyed by piece placement
//!
//! The default book follows the first moves of the Queen's Gambit Declined exchange line and
//! of the Catalan for White.

use std::collections::HashMap;

use crate::types::Move;

const DEFAULT_LINES: [(&str, &str); 10] = [
    // Queen's Gambit Declined, exchange variation
    ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", "d2d4"),
    ("rnbqkbnr/ppp1pppp/8/3p4/3P4/8/PPP1PPPP/RNBQKBNR", "c2c4"),
    ("rnbqkbnr/ppp2ppp/4p3/3p4/2PP4/8/PP2PPPP/RNBQKBNR", "b1c3"),
    ("rnbqkb1r/ppp2ppp/4pn2/3p4/2PP4/2N5/PP2PPPP/R1BQKBNR", "c4d5"),
    ("rnbqkb1r/ppp2ppp/5n2/3p4/3P4/2N5/PP2PPPP/R1BQKBNR", "c1g5"),
    ("rnbqkb1r/pp3ppp/2p2n2/3p2B1/3P4/2N5/PP2PPPP/R2QKBNR", "e2e3"),
    // Catalan
    ("rnbqkb1r/pppppppp/5n2/8/3P4/8/PPP1PPPP/RNBQKBNR", "c2c4"),
    ("rnbqkb1r/pppp1ppp/4pn2/8/2PP4/8/PP2PPPP/RNBQKBNR", "g2g3"),
    ("rnbqk2r/pppp1ppp/4pn2/8/1bPP4/6P1/PP2PP1P/RNBQKBNR", "c1d2"),
    ("rnbqk2r/ppppbppp/4pn2/8/2PP4/6P1/PP1BPP1P/RN1QKBNR", "f1g2"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningBook {
    entries: HashMap<String, Move>,
}

impl OpeningBook {
    pub fn empty() -> OpeningBook {
        OpeningBook::default()
    }

    /// Book with the built-in lines.
    pub fn standard() -> OpeningBook {
        let mut book = OpeningBook::empty();
        for (placement, text) in DEFAULT_LINES {
            if let Ok(mv) = text.parse() {
                book.insert(placement, mv);
            }
        }
        book
    }

    pub fn insert(&mut self, placement: impl Into<String>, mv: Move) {
        self.entries.insert(placement.into(), mv);
    }

    pub fn lookup(&self, placement: &str) -> Option<Move> {
        self.entries.get(placement).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GameState;

    #[test]
    fn test_standard_book_has_every_line() {
        assert_eq!(OpeningBook::standard().len(), DEFAULT_LINES.len());
    }

    #[test]
    fn test_start_position_opens_with_queen_pawn() {
        let book = OpeningBook::standard();
        let start = GameState::new();
        assert_eq!(book.lookup(&start.placement()), "d2d4".parse().ok());
    }

    #[test]
    fn test_every_book_move_is_legal_for_white() {
        for (placement, text) in DEFAULT_LINES {
            let state = GameState::from_fen(&format!("{placement} w KQkq - 0 1")).unwrap();
            let mv = text.parse().unwrap();
            assert!(
                state.legal_moves().contains(&mv),
                "{text} is not legal in {placement}"
            );
        }
    }
}
