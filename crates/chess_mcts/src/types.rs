//! # Core Types - Colors, Pieces, Squares and Moves
//!
//! ## Overview
//!
//! Every piece of chess state in this crate is a small `Copy` value. A [`Piece`] is identified by
//! its `(kind, color, square)` triple rather than by an opaque handle, which keeps captured-piece
//! bookkeeping a plain equality match and lets a whole [`crate::board::Position`] be duplicated
//! with a single `clone()` for speculative moves and search rollouts.
//!
//! ## Coordinates
//!
//! A [`Square`] holds a `rank` (0 = White's back rank, `"1"` in algebraic form) and a `file`
//! (0 = the a-file). Off-board coordinates are never stored: [`Square::offset`] is the only way
//! to step across the board and it returns `None` at the edge.
//!
//! ## Results
//!
//! [`GameResult`] maps onto the numeric scale used by the search (`1.0` White win, `0.0` Black
//! win, `0.5` draw). [`Outcome`] records *why* a game ended.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a pawn push for this color.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank index of this color's back rank.
    #[inline]
    pub fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    #[inline]
    pub fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    #[inline]
    pub fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// FEN side-to-move letter.
    pub fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// The six piece kinds. The set is closed, so dispatch is an exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Static material value (see [`crate::constants`]).
    pub fn value(self) -> f64 {
        match self {
            PieceKind::Pawn => PAWN_VALUE,
            PieceKind::Knight => KNIGHT_VALUE,
            PieceKind::Bishop => BISHOP_VALUE,
            PieceKind::Rook => ROOK_VALUE,
            PieceKind::Queen => QUEEN_VALUE,
            PieceKind::King => KING_VALUE,
        }
    }

    /// Uppercase FEN letter.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Bishops and knights.
    #[inline]
    pub fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub rank: u8,
    pub file: u8,
}

impl Square {
    /// Build a square, returning `None` when either coordinate is off the board.
    #[inline]
    pub fn new(rank: u8, file: u8) -> Option<Square> {
        if rank < 8 && file < 8 {
            Some(Square { rank, file })
        } else {
            None
        }
    }

    /// Step by a `(rank, file)` delta; `None` once the step leaves the board.
    #[inline]
    pub fn offset(self, d_rank: i8, d_file: i8) -> Option<Square> {
        let rank = self.rank as i8 + d_rank;
        let file = self.file as i8 + d_file;
        if (0..BOARD_SIZE).contains(&rank) && (0..BOARD_SIZE).contains(&file) {
            Some(Square {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// Iterate all 64 squares, rank 0 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { rank, file }))
    }
}

/// A piece standing on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Piece {
        Piece {
            kind,
            color,
            square,
        }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn fen_char(&self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

/// A move in coordinate form, displayed as four-character algebraic text (`e2e4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }
}

/// Final score of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWin,
    BlackWin,
    Draw,
}

impl GameResult {
    /// Numeric result: 1 White win, 0 Black win, 0.5 draw.
    pub fn value(self) -> f64 {
        match self {
            GameResult::WhiteWin => RESULT_WHITE_WIN,
            GameResult::BlackWin => RESULT_BLACK_WIN,
            GameResult::Draw => RESULT_DRAW,
        }
    }

    pub fn win_for(color: Color) -> GameResult {
        match color {
            Color::White => GameResult::WhiteWin,
            Color::Black => GameResult::BlackWin,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::WhiteWin => write!(f, "1-0"),
            GameResult::BlackWin => write!(f, "0-1"),
            GameResult::Draw => write!(f, "1/2-1/2"),
        }
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
}

impl Outcome {
    pub fn result(self) -> GameResult {
        match self {
            Outcome::Checkmate { winner } => GameResult::win_for(winner),
            Outcome::Stalemate | Outcome::InsufficientMaterial | Outcome::FiftyMoveRule => {
                GameResult::Draw
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "checkmate, {} wins ({})", winner, self.result()),
            Outcome::Stalemate => write!(f, "stalemate ({})", self.result()),
            Outcome::InsufficientMaterial => {
                write!(f, "insufficient material ({})", self.result())
            }
            Outcome::FiftyMoveRule => write!(f, "fifty-move rule ({})", self.result()),
        }
    }
}

/// Castling rights of one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        kingside: true,
        queenside: true,
    };
    pub const NONE: CastlingRights = CastlingRights {
        kingside: false,
        queenside: false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_offset_stays_on_board() {
        let a1 = Square::new(0, 0).unwrap();
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(a1.offset(1, 2), Square::new(1, 2));

        let h8 = Square::new(7, 7).unwrap();
        assert_eq!(h8.offset(1, 0), None);
        assert_eq!(h8.offset(-7, -7), Some(a1));
    }

    #[test]
    fn test_all_squares_enumerates_board() {
        assert_eq!(Square::all().count(), 64);
        assert_eq!(Square::all().next(), Square::new(0, 0));
    }

    #[test]
    fn test_outcome_result_polarity() {
        assert_eq!(
            Outcome::Checkmate { winner: Color::White }.result().value(),
            1.0
        );
        assert_eq!(
            Outcome::Checkmate { winner: Color::Black }.result().value(),
            0.0
        );
        assert_eq!(Outcome::FiftyMoveRule.result().value(), 0.5);
    }
}
