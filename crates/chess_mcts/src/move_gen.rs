//! Per-piece legal destination generation
//!
//! Every piece kind exposes one capability: the set of squares it may move to on the current
//! board. Generation is a pure function of the grid (plus the last history entry for en
//! passant and the castling rights for the king); nothing here mutates a [`Position`].
//!
//! ## Module Organization
//!
//! - `pawn` - pushes, double pushes, diagonal captures, en passant
//! - `knight` - L-shaped jumps
//! - `sliding` - bishop, rook and queen ray casts
//! - `king` - single steps filtered by attack tests, castling
//! - `attack` - "is this square attacked by that color?"
//!
//! Pawn and knight destinations never consider king safety; the king filters its own steps.
//! Full legality (pins, discovered checks) is enforced by [`crate::api::GameState::apply`].

mod attack;
mod king;
mod knight;
mod pawn;
mod sliding;

pub use attack::{is_in_check, is_square_attacked};
pub use king::castling_destinations;

use crate::board::{Grid, Position};
use crate::constants::*;
use crate::types::*;

/// Legal destinations of `piece` on `position`.
///
/// Returns an empty vector when the piece cannot move. The piece must be the one standing on
/// `piece.square`.
pub fn legal_destinations(piece: &Piece, position: &Position) -> Vec<Square> {
    let grid = position.grid();
    let mut out = Vec::with_capacity(16);
    match piece.kind {
        PieceKind::Pawn => pawn::destinations(piece, grid, position.last_move(), &mut out),
        PieceKind::Knight => knight::destinations(piece, grid, &mut out),
        PieceKind::Bishop => sliding::destinations(piece, grid, &BISHOP_DIRS, &mut out),
        PieceKind::Rook => sliding::destinations(piece, grid, &ROOK_DIRS, &mut out),
        PieceKind::Queen => sliding::destinations(piece, grid, &QUEEN_DIRS, &mut out),
        PieceKind::King => {
            king::step_destinations(piece, grid, &mut out);
            king::castling_destinations(piece, position, &mut out);
        }
    }
    out
}

#[inline]
pub(crate) fn occupant(grid: &Grid, square: Square) -> Option<Piece> {
    grid[square.rank as usize][square.file as usize]
}

#[inline]
pub(crate) fn is_friendly(grid: &Grid, square: Square, color: Color) -> bool {
    matches!(occupant(grid, square), Some(p) if p.color == color)
}

#[inline]
pub(crate) fn is_enemy(grid: &Grid, square: Square, color: Color) -> bool {
    matches!(occupant(grid, square), Some(p) if p.color != color)
}
