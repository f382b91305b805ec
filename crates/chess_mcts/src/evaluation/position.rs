//! Full position evaluation
//!
//! Material plus positional bonuses for pawns and knights:
//! - pawn: mobility, central ranks, its color's central squares, advancement
//! - knight: mobility and control of the four central squares

use crate::board::Position;
use crate::constants::POSITIONAL_STEP;
use crate::move_gen::legal_destinations;
use crate::types::*;

const CENTER: [Square; 4] = [
    Square { rank: 3, file: 3 },
    Square { rank: 3, file: 4 },
    Square { rank: 4, file: 3 },
    Square { rank: 4, file: 4 },
];

/// Evaluate full position (positive favors White)
pub fn evaluate_position(position: &Position) -> f64 {
    position
        .pieces()
        .iter()
        .map(|p| {
            let score = piece_score(p, position);
            match p.color {
                Color::White => score,
                Color::Black => -score,
            }
        })
        .sum()
}

/// Unsigned score of one piece: its material value plus any positional bonus.
pub fn piece_score(piece: &Piece, position: &Position) -> f64 {
    match piece.kind {
        PieceKind::Pawn => piece.kind.value() + pawn_bonus(piece, position),
        PieceKind::Knight => piece.kind.value() + knight_bonus(piece, position),
        _ => piece.kind.value(),
    }
}

fn pawn_bonus(pawn: &Piece, position: &Position) -> f64 {
    let Square { rank, file } = pawn.square;
    let mut bonus = 0.0;

    if rank == 3 || rank == 4 {
        bonus += POSITIONAL_STEP;
    }
    let own_center_rank = match pawn.color {
        Color::White => 3,
        Color::Black => 4,
    };
    if rank == own_center_rank && (file == 3 || file == 4) {
        bonus += POSITIONAL_STEP;
    }

    bonus += legal_destinations(pawn, position).len() as f64 * POSITIONAL_STEP;

    let advanced = (rank as i8 - pawn.color.pawn_start_rank() as i8).unsigned_abs();
    bonus += advanced as f64 * POSITIONAL_STEP;
    bonus
}

fn knight_bonus(knight: &Piece, position: &Position) -> f64 {
    let moves = legal_destinations(knight, position);
    let control = moves.iter().filter(|sq| CENTER.contains(sq)).count();
    (moves.len() + control) as f64 * POSITIONAL_STEP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_is_balanced() {
        let score = evaluate_position(&Position::start());
        assert!(score.abs() < 1e-9, "symmetric start should score 0, got {score}");
    }

    #[test]
    fn test_central_knight_outscores_rim_knight() {
        let position = Position::from_fen("4k3/8/8/8/3N4/8/8/N3K3 w - - 0 1").unwrap();
        let center = position.piece_at("d4".parse().unwrap()).unwrap();
        let rim = position.piece_at("a1".parse().unwrap()).unwrap();
        assert!(piece_score(&center, &position) > piece_score(&rim, &position));
    }

    #[test]
    fn test_advanced_pawn_scores_higher() {
        let position = Position::from_fen("4k3/8/8/4P3/8/8/3P4/4K3 w - - 0 1").unwrap();
        let advanced = position.piece_at("e5".parse().unwrap()).unwrap();
        let home = position.piece_at("d2".parse().unwrap()).unwrap();
        assert!(piece_score(&advanced, &position) > piece_score(&home, &position));
    }
}
