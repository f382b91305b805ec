//! Knight move generation
//!
//! Knights jump in an L-shape, so only the destination square matters: it must be on the
//! board and not hold a friendly piece.

use super::is_friendly;
use crate::board::Grid;
use crate::constants::KNIGHT_DIRS;
use crate::types::*;

pub(crate) fn destinations(piece: &Piece, grid: &Grid, out: &mut Vec<Square>) {
    for &(dr, df) in &KNIGHT_DIRS {
        if let Some(to) = piece.square.offset(dr, df) {
            if !is_friendly(grid, to, piece.color) {
                out.push(to);
            }
        }
    }
}
