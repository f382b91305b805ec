//! Game construction, queries and random play

use rand::Rng;
use tracing::trace;

use super::state::leaves_king_safe;
use super::GameState;
use crate::board::Position;
use crate::error::{FenError, MoveError, MoveResult};
use crate::evaluation;
use crate::move_gen::legal_destinations;
use crate::types::*;

impl GameState {
    /// Standard starting position, White to move.
    pub fn new() -> GameState {
        GameState {
            position: Position::start(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<GameState, FenError> {
        Ok(GameState {
            position: Position::from_fen(fen)?,
        })
    }

    pub fn from_position(position: Position) -> GameState {
        GameState { position }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub(crate) fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn fen(&self) -> String {
        self.position.fen()
    }

    /// Piece-placement field only (the opening book key).
    pub fn placement(&self) -> String {
        self.position.placement()
    }

    pub fn is_game_over(&self) -> bool {
        self.position.is_game_over()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.position.result()
    }

    pub fn history(&self) -> &[Move] {
        self.position.history()
    }

    /// Every `(piece, destination)` pair the per-piece generators produce for the side to move.
    ///
    /// These are pseudo-legal: a pinned piece still lists its destinations. Order follows the
    /// piece list, which is rank-major from a1.
    pub fn candidate_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for piece in self.position.pieces_of(self.turn()) {
            for to in legal_destinations(piece, &self.position) {
                moves.push(Move::new(piece.square, to));
            }
        }
        moves
    }

    /// Candidate moves that [`GameState::apply`] would accept.
    ///
    /// Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_game_over() {
            return Vec::new();
        }
        let mut moves = Vec::with_capacity(48);
        for piece in self.position.pieces_of(self.turn()) {
            for to in legal_destinations(piece, &self.position) {
                if leaves_king_safe(&self.position, piece, to) {
                    moves.push(Move::new(piece.square, to));
                }
            }
        }
        moves
    }

    /// Play a uniformly random move for the side to move.
    ///
    /// Candidates are drawn without replacement until one is accepted. Returns the move on
    /// success; a move that ends the game surfaces as [`MoveError::GameOver`] with the state
    /// already updated.
    pub fn play_random_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MoveResult<Move> {
        if self.is_game_over() {
            return Err(MoveError::GameAlreadyOver);
        }
        let mut pool = self.candidate_moves();
        while !pool.is_empty() {
            let mv = pool.swap_remove(rng.random_range(0..pool.len()));
            match self.apply(mv) {
                Ok(()) => return Ok(mv),
                Err(e) if e.is_recoverable() => {
                    trace!("[RULES] random candidate {} rejected: {}", mv, e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(MoveError::NoLegalMoves)
    }

    /// White material minus Black material.
    pub fn material_balance(&self) -> f64 {
        evaluation::material_balance(&self.position)
    }

    /// Material plus positional bonuses, from White's point of view.
    pub fn evaluate(&self) -> f64 {
        evaluation::evaluate_position(&self.position)
    }
}
