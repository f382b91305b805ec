//! Public API for the rules engine
//!
//! [`GameState`] is the only type callers need to play a game: it wraps a [`Position`] and
//! exposes move application, move enumeration, random play and evaluation.
//!
//! ## Module Organization
//!
//! - `game` - construction, accessors, enumeration and random play
//! - `moves` - [`GameState::apply`], the single entry point that changes a game
//! - `state` - terminal detection (checkmate, stalemate, draw rules)

mod game;
mod moves;
mod state;

use crate::board::Position;

/// A game in progress (or finished).
///
/// Two states compare equal when their positions, histories and counters are identical;
/// the search tree relies on this to re-find a position after the opponent replies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    position: Position,
}
