//! Sliding piece move generation
//!
//! Common functionality for bishops, rooks and queens. Each ray walks outward from the piece
//! until it leaves the board or meets a piece:
//! - Empty squares: valid, keep walking
//! - Opponent piece: valid capture, then stop
//! - Own piece: invalid, stop

use super::occupant;
use crate::board::Grid;
use crate::types::*;

pub(crate) fn destinations(piece: &Piece, grid: &Grid, dirs: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(dr, df) in dirs {
        let mut current = piece.square;
        while let Some(next) = current.offset(dr, df) {
            match occupant(grid, next) {
                None => out.push(next),
                Some(other) => {
                    if other.color != piece.color {
                        out.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}
