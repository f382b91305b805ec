//! Pawn move generation
//!
//! Handles pawn-specific destinations:
//! - Single push onto an empty square
//! - Double push from the starting rank when both squares are empty
//! - Diagonal capture onto an enemy-occupied square
//! - En passant, derived from the last move in the history
//!
//! Promotion is not a destination concern; it happens when the move is executed.

use super::{is_enemy, occupant};
use crate::board::Grid;
use crate::types::*;

/// Append the pawn's destinations to `out`.
///
/// `last_move` is the most recent history entry. En passant is offered when that move was a
/// two-square advance by an enemy pawn that landed beside this pawn on the same rank; the
/// destination is the square the enemy pawn skipped over.
pub(crate) fn destinations(piece: &Piece, grid: &Grid, last_move: Option<Move>, out: &mut Vec<Square>) {
    let forward = piece.color.forward();

    if let Some(one) = piece.square.offset(forward, 0) {
        if occupant(grid, one).is_none() {
            out.push(one);
            if piece.square.rank == piece.color.pawn_start_rank() {
                if let Some(two) = one.offset(forward, 0) {
                    if occupant(grid, two).is_none() {
                        out.push(two);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        if let Some(target) = piece.square.offset(forward, side) {
            if is_enemy(grid, target, piece.color) {
                out.push(target);
            }
        }
    }

    if let Some(target) = en_passant_target(piece, grid, last_move) {
        out.push(target);
    }
}

fn en_passant_target(piece: &Piece, grid: &Grid, last_move: Option<Move>) -> Option<Square> {
    let last = last_move?;
    let passed = occupant(grid, last.to)?;
    if passed.kind != PieceKind::Pawn || passed.color == piece.color {
        return None;
    }
    let advanced_two = (last.to.rank as i8 - last.from.rank as i8).abs() == 2;
    let beside = last.to.rank == piece.square.rank
        && (last.to.file as i8 - piece.square.file as i8).abs() == 1;
    if !(advanced_two && beside) {
        return None;
    }
    let target = last.to.offset(piece.color.forward(), 0)?;
    occupant(grid, target).is_none().then_some(target)
}
