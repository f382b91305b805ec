//! # Engine Constants - Piece Values, Directions & Search Defaults
//!
//! ## Overview
//!
//! Centralizes the constant values shared by the rules engine and the search: material values
//! in whole pawns, movement direction vectors expressed as `(rank, file)` deltas, the starting
//! position, draw thresholds and the default search parameters.
//!
//! ## Piece Values
//!
//! - **Pawn**: 1
//! - **Knight / Bishop**: 3
//! - **Rook**: 5
//! - **Queen**: 9
//! - **King**: 1000
//!
//! The king value is a sentinel so that a material sum never treats the king as tradeable. It is
//! not meant to be summed meaningfully. The values only feed the advisory scorer in
//! [`crate::evaluation`]; legality never looks at them.
//!
//! ## Direction Vectors
//!
//! Directions are `(rank delta, file delta)` pairs. Rank 0 is White's back rank, so White pawns
//! advance with `+1` and Black pawns with `-1`.

pub const PAWN_VALUE: f64 = 1.0;
pub const KNIGHT_VALUE: f64 = 3.0;
pub const BISHOP_VALUE: f64 = 3.0;
pub const ROOK_VALUE: f64 = 5.0;
pub const QUEEN_VALUE: f64 = 9.0;
pub const KING_VALUE: f64 = 1000.0;

/// Per-square bonus used by the pawn and knight positional terms.
pub const POSITIONAL_STEP: f64 = 0.1;

pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 1), (1, -1), (-1, 1), (-1, -1),
    (1, 0), (-1, 0), (0, 1), (0, -1),
];
pub const KING_DIRS: [(i8, i8); 8] = QUEEN_DIRS;
pub const KNIGHT_DIRS: [(i8, i8); 8] = [
    (2, 1), (2, -1), (-2, 1), (-2, -1),
    (1, 2), (1, -2), (-1, 2), (-1, -2),
];

pub const BOARD_SIZE: i8 = 8;

/// Home file of both kings (the e-file).
pub const KING_HOME_FILE: u8 = 4;
pub const KINGSIDE_ROOK_FILE: u8 = 7;
pub const QUEENSIDE_ROOK_FILE: u8 = 0;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value that ends the game under the fifty-move rule.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

pub const RESULT_WHITE_WIN: f64 = 1.0;
pub const RESULT_BLACK_WIN: f64 = 0.0;
pub const RESULT_DRAW: f64 = 0.5;

/// Default slot count of the lossy transposition table (a prime).
pub const DEFAULT_TT_SLOTS: usize = 1009;

pub const DEFAULT_ITERATIONS: u32 = 200;
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;
