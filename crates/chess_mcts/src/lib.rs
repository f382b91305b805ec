//! Chess rules engine and Monte-Carlo tree search planner
//!
//! The crate is split in two halves:
//! - the rules engine ([`board`], [`move_gen`], [`api`]) which enforces full chess legality
//!   (check safety, castling, en passant, promotion, draw rules) and reports terminal outcomes
//! - the planner ([`search`], [`hash`]) which picks moves with UCB1 tree search, random
//!   playouts, alpha/beta bounds and a transposition table
//!
//! ```rust
//! use chess_mcts::{GameState, Mcts, SearchConfig};
//!
//! let mut game = GameState::new();
//! game.apply_notation("e2e4").unwrap();
//!
//! let config = SearchConfig { iterations: 4, ..SearchConfig::default() }.with_seed(7);
//! let mut engine = Mcts::new(config).unwrap();
//! let reply = engine.select_move(&game).unwrap();
//! assert!(game.legal_moves().contains(&reply));
//! ```

pub mod api;
pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod hash;
pub mod move_gen;
pub mod notation;
pub mod search;
pub mod types;

pub use api::GameState;
pub use board::Position;
pub use config::{Difficulty, SearchConfig};
pub use error::{ConfigError, FenError, IllegalReason, MoveError, NotationError, SearchError};
pub use hash::{fingerprint, TableMode, TranspositionTable, TtEntry};
pub use search::{Mcts, OpeningBook, PositionEvaluator};
pub use types::{Color, GameResult, Move, Outcome, Piece, PieceKind, Square};
