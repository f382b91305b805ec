//! Terminal detection
//!
//! After every committed move the side now to move is examined, in this order:
//! 1. no legal move while in check: checkmate for the other side
//! 2. no legal move while not in check: stalemate
//! 3. neither side can force mate: insufficient material
//! 4. one hundred half-moves without a capture or pawn move: fifty-move rule

use super::GameState;
use crate::board::Position;
use crate::constants::FIFTY_MOVE_LIMIT;
use crate::move_gen::{is_in_check, is_square_attacked, legal_destinations};
use crate::types::*;

impl GameState {
    /// True when the side to move is in check.
    pub fn in_check(&self) -> bool {
        is_in_check(self.position(), self.turn())
    }

    pub fn is_insufficient_material(&self) -> bool {
        is_insufficient_material(self.position())
    }
}

/// Classify `position` as finished, or `None` while play continues.
pub(crate) fn detect_outcome(position: &Position) -> Option<Outcome> {
    let side = position.turn();
    if !has_legal_move(position, side) {
        return Some(if is_in_check(position, side) {
            Outcome::Checkmate {
                winner: side.opponent(),
            }
        } else {
            Outcome::Stalemate
        });
    }
    if is_insufficient_material(position) {
        return Some(Outcome::InsufficientMaterial);
    }
    if position.half_moves() >= FIFTY_MOVE_LIMIT {
        return Some(Outcome::FiftyMoveRule);
    }
    None
}

fn has_legal_move(position: &Position, side: Color) -> bool {
    // King destinations are already filtered for safety
    let king_can_move = position
        .king_square(side)
        .and_then(|sq| position.piece_at(sq))
        .is_some_and(|king| !legal_destinations(&king, position).is_empty());
    if king_can_move {
        return true;
    }
    position
        .pieces_of(side)
        .filter(|p| p.kind != PieceKind::King)
        .any(|piece| {
            legal_destinations(piece, position)
                .into_iter()
                .any(|to| leaves_king_safe(position, piece, to))
        })
}

/// True when neither side has enough material to deliver mate.
///
/// Drawn material sets:
/// - bare kings
/// - king and one minor piece against a bare king
/// - king and one minor piece each
/// - king and two knights against a bare king
///
/// Any pawn, rook or queen on the board means play continues.
pub fn is_insufficient_material(position: &Position) -> bool {
    let pieces = position.pieces();
    if pieces
        .iter()
        .any(|p| matches!(p.kind, PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen))
    {
        return false;
    }

    let white = position.pieces_of(Color::White).count();
    let black = position.pieces_of(Color::Black).count();
    match (white, black) {
        (1, 1) | (2, 1) | (1, 2) | (2, 2) => true,
        (3, 1) => only_knights(position, Color::White),
        (1, 3) => only_knights(position, Color::Black),
        _ => false,
    }
}

fn only_knights(position: &Position, color: Color) -> bool {
    position
        .pieces_of(color)
        .filter(|p| p.kind != PieceKind::King)
        .all(|p| p.kind == PieceKind::Knight)
}

/// Simulate `piece` moving to `to` on a scratch grid and report whether its own king is
/// attacked afterwards. With `with_en_passant` set, a pawn moving diagonally onto an empty
/// square also removes the pawn it passes.
pub(crate) fn king_exposed_after(
    position: &Position,
    piece: &Piece,
    to: Square,
    with_en_passant: bool,
) -> bool {
    let mut scratch = *position.grid();
    let from = piece.square;
    let target_empty = scratch[to.rank as usize][to.file as usize].is_none();

    if with_en_passant && piece.kind == PieceKind::Pawn && from.file != to.file && target_empty {
        scratch[from.rank as usize][to.file as usize] = None;
    }
    scratch[from.rank as usize][from.file as usize] = None;
    scratch[to.rank as usize][to.file as usize] = Some(Piece::new(piece.kind, piece.color, to));

    let king = if piece.kind == PieceKind::King {
        Some(to)
    } else {
        position.king_square(piece.color)
    };
    match king {
        Some(king) => is_square_attacked(&scratch, king, piece.color.opponent()),
        None => false,
    }
}

#[inline]
pub(crate) fn leaves_king_safe(position: &Position, piece: &Piece, to: Square) -> bool {
    !king_exposed_after(position, piece, to, true)
}
