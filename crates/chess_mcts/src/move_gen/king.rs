//! King move generation
//!
//! Kings step one square in any direction. Every step is filtered by simulate-then-check: the
//! king is placed on the destination of a scratch grid and the square is kept only if no enemy
//! piece attacks it there.
//!
//! ## Castling
//!
//! Castling destinations (the g- or c-file square) are appended when:
//! - the king stands on its home square and is not in check
//! - the matching castling right is still held
//! - the rook of the same color stands on its corner
//! - every square between king and rook is empty
//! - neither the transit square nor the destination is attacked

use super::attack::is_square_attacked;
use super::{is_friendly, occupant};
use crate::board::{Grid, Position};
use crate::constants::*;
use crate::types::*;

/// Single-step destinations that do not walk into an attack.
pub(crate) fn step_destinations(king: &Piece, grid: &Grid, out: &mut Vec<Square>) {
    for &(dr, df) in &KING_DIRS {
        let Some(to) = king.square.offset(dr, df) else {
            continue;
        };
        if is_friendly(grid, to, king.color) {
            continue;
        }
        if !attacked_after_step(grid, king, to) {
            out.push(to);
        }
    }
}

/// Append the castling destinations available to `king` on `position`.
pub fn castling_destinations(king: &Piece, position: &Position, out: &mut Vec<Square>) {
    let color = king.color;
    let home = color.home_rank();
    if king.kind != PieceKind::King || king.square != (Square { rank: home, file: KING_HOME_FILE }) {
        return;
    }
    let rights = position.castling(color);
    if !rights.kingside && !rights.queenside {
        return;
    }
    let grid = position.grid();
    if is_square_attacked(grid, king.square, color.opponent()) {
        return;
    }

    // (right held, rook file, squares that must be empty, transit file, destination file)
    let sides = [
        (rights.kingside, KINGSIDE_ROOK_FILE, &[5u8, 6][..], 5u8, 6u8),
        (rights.queenside, QUEENSIDE_ROOK_FILE, &[1u8, 2, 3][..], 3u8, 2u8),
    ];

    for (held, rook_file, between, transit, dest) in sides {
        if !held || !has_home_rook(grid, color, home, rook_file) {
            continue;
        }
        let path_clear = between
            .iter()
            .all(|&file| occupant(grid, Square { rank: home, file }).is_none());
        if !path_clear {
            continue;
        }
        let transit = Square { rank: home, file: transit };
        let dest = Square { rank: home, file: dest };
        if !attacked_after_step(grid, king, transit) && !attacked_after_step(grid, king, dest) {
            out.push(dest);
        }
    }
}

fn has_home_rook(grid: &Grid, color: Color, rank: u8, file: u8) -> bool {
    matches!(
        occupant(grid, Square { rank, file }),
        Some(p) if p.kind == PieceKind::Rook && p.color == color
    )
}

/// Place the king on `to` in a scratch copy of `grid` and test whether it is attacked there.
fn attacked_after_step(grid: &Grid, king: &Piece, to: Square) -> bool {
    let mut scratch = *grid;
    scratch[king.square.rank as usize][king.square.file as usize] = None;
    scratch[to.rank as usize][to.file as usize] = Some(Piece::new(PieceKind::King, king.color, to));
    is_square_attacked(&scratch, to, king.color.opponent())
}
