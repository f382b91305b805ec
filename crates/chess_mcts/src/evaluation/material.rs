//! Material evaluation
//!
//! Signed sum of static piece values. Both kings are counted, so they cancel out.

use crate::board::Position;
use crate::types::*;

/// Evaluate material balance (positive favors White)
pub fn material_balance(position: &Position) -> f64 {
    position
        .pieces()
        .iter()
        .map(|p| match p.color {
            Color::White => p.kind.value(),
            Color::Black => -p.kind.value(),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_material_balance() {
        assert_eq!(material_balance(&Position::start()), 0.0);
    }

    #[test]
    fn test_white_up_queen() {
        let position =
            Position::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(material_balance(&position), 9.0);
    }

    #[test]
    fn test_black_up_pawn() {
        let position =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(material_balance(&position), -1.0);
    }
}
