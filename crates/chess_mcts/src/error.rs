//! Error types for the chess engine
//!
//! Provides error types for move notation, FEN parsing, move execution and search.
//! Move errors split into two families: recoverable rejections (the position is unchanged
//! and the caller may try another move) and the terminal [`MoveError::GameOver`] signal.

use thiserror::Error;

use crate::types::{Color, Outcome};

/// Errors raised while parsing algebraic coordinates and moves
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Text is not exactly two (square) or four (move) characters
    #[error("Invalid length for \"{text}\": expected {expected} characters")]
    InvalidLength { text: String, expected: usize },

    /// File letter outside `a`-`h`
    #[error("Invalid file '{file}' (must be a-h)")]
    InvalidFile { file: char },

    /// Rank digit outside `1`-`8`
    #[error("Invalid rank '{rank}' (must be 1-8)")]
    InvalidRank { rank: char },
}

/// Errors raised while reading a FEN string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN must have 6 space-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("FEN placement must have 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("FEN rank {rank} does not describe exactly 8 squares")]
    RankWidth { rank: usize },

    #[error("Unknown piece letter '{letter}' in FEN")]
    UnknownPiece { letter: char },

    #[error("Invalid active color \"{color}\" in FEN")]
    ActiveColor { color: String },

    #[error("Invalid castling field \"{field}\" in FEN")]
    Castling { field: String },

    #[error("Invalid counter \"{value}\" in FEN")]
    Counter { value: String },

    #[error("FEN must contain exactly one {color} king, found {found}")]
    KingCount { color: Color, found: usize },
}

/// Why a move attempt was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    EmptySource,
    NotLegal,
    SelfCapture,
    ExposesKing,
    CastlingBlocked,
    PinnedPiece,
}

impl std::fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            IllegalReason::EmptySource => "empty source",
            IllegalReason::NotLegal => "not legal",
            IllegalReason::SelfCapture => "self-capture",
            IllegalReason::ExposesKing => "exposes king",
            IllegalReason::CastlingBlocked => "castling blocked",
            IllegalReason::PinnedPiece => "pinned piece",
        };
        f.write_str(text)
    }
}

/// Errors that can occur when applying a move
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoveError {
    /// Malformed move text
    #[error("Invalid move notation: {0}")]
    Notation(#[from] NotationError),

    /// Illegal move attempt; the position is unchanged
    #[error("Illegal move: {reason}")]
    IllegalMove { reason: IllegalReason },

    /// Piece on the source square belongs to the side not on move
    #[error("Wrong color: {to_move} is to move")]
    WrongColor { to_move: Color },

    /// The move ended the game (checkmate, stalemate or a draw rule)
    #[error("Game over: {0}")]
    GameOver(Outcome),

    /// A move was attempted after the game had already finished
    #[error("Game already over")]
    GameAlreadyOver,

    /// Random play found no candidate the rules accept
    #[error("No legal moves available")]
    NoLegalMoves,
}

impl MoveError {
    pub(crate) fn illegal(reason: IllegalReason) -> MoveError {
        MoveError::IllegalMove { reason }
    }

    /// True when the move was played and ended the game.
    pub fn is_game_over(&self) -> bool {
        matches!(self, MoveError::GameOver(_))
    }

    /// True when the attempt was rejected and may be retried with another move.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MoveError::Notation(_) | MoveError::IllegalMove { .. } | MoveError::WrongColor { .. }
        )
    }
}

/// Errors that can occur in the search engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The position handed to the search is already finished
    #[error("Cannot search a finished game")]
    GameOver,

    /// The side to move has no legal move
    #[error("No legal moves available")]
    NoLegalMoves,

    /// The rules engine broke an invariant inside a rollout
    #[error("Rules engine invariant violated during search: {message}")]
    Invariant { message: String },
}

/// Errors raised when a search configuration is out of range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Iteration budget must be at least 1")]
    ZeroIterations,

    #[error("Exploration constant must be finite and non-negative, got {value}")]
    Exploration { value: f64 },

    #[error("Lossy transposition table needs at least one slot")]
    ZeroSlots,
}

/// Result type alias for move execution
pub type MoveResult<T> = Result<T, MoveError>;

/// Result type alias for search operations
pub type SearchResult<T> = Result<T, SearchError>;
