//! Attack detection and check testing
//!
//! To decide whether a square is attacked we walk the attacker's pieces and ask whether each
//! one could move onto that square. The tests are geometric, so they match what the piece's
//! destination generator would return when the square holds a defending piece:
//! - pawns attack the two forward diagonals
//! - knights attack their eight L-squares
//! - sliders attack along unobstructed rays
//! - a king attacks its eight neighbours (without any safety filter of its own)

use super::occupant;
use crate::board::{Grid, Position};
use crate::constants::*;
use crate::types::*;

/// Check if `square` is attacked by any piece of color `by` on `grid`.
pub fn is_square_attacked(grid: &Grid, square: Square, by: Color) -> bool {
    for from in Square::all() {
        let Some(piece) = occupant(grid, from) else {
            continue;
        };
        if piece.color != by || from == square {
            continue;
        }

        let can_attack = match piece.kind {
            PieceKind::Pawn => can_pawn_attack(&piece, square),
            PieceKind::Knight => can_step_attack(&piece, square, &KNIGHT_DIRS),
            PieceKind::Bishop => can_slide_attack(grid, &piece, square, &BISHOP_DIRS),
            PieceKind::Rook => can_slide_attack(grid, &piece, square, &ROOK_DIRS),
            PieceKind::Queen => can_slide_attack(grid, &piece, square, &QUEEN_DIRS),
            PieceKind::King => can_step_attack(&piece, square, &KING_DIRS),
        };

        if can_attack {
            return true;
        }
    }

    false
}

/// Check if `color`'s king is attacked on `position`.
///
/// A position without a king of that color is never in check.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    match position.king_square(color) {
        Some(king) => is_square_attacked(position.grid(), king, color.opponent()),
        None => false,
    }
}

fn can_pawn_attack(pawn: &Piece, target: Square) -> bool {
    let forward = pawn.color.forward();
    [-1, 1]
        .into_iter()
        .any(|side| pawn.square.offset(forward, side) == Some(target))
}

fn can_step_attack(piece: &Piece, target: Square, dirs: &[(i8, i8)]) -> bool {
    dirs.iter()
        .any(|&(dr, df)| piece.square.offset(dr, df) == Some(target))
}

fn can_slide_attack(grid: &Grid, piece: &Piece, target: Square, dirs: &[(i8, i8)]) -> bool {
    for &(dr, df) in dirs {
        let mut current = piece.square;
        while let Some(next) = current.offset(dr, df) {
            if next == target {
                return true;
            }
            if occupant(grid, next).is_some() {
                break;
            }
            current = next;
        }
    }
    false
}
