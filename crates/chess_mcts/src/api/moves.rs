//! Move execution and validation
//!
//! [`GameState::apply`] is the only operation that changes a game. Every step works on a
//! scratch copy of the position; the copy replaces the live position only once the move has
//! passed every check, so a rejected move leaves the game exactly as it was.

use tracing::{debug, trace};

use super::state::{detect_outcome, king_exposed_after};
use super::GameState;
use crate::board::Position;
use crate::constants::*;
use crate::error::{IllegalReason, MoveError, MoveResult};
use crate::move_gen::{castling_destinations, is_in_check, legal_destinations};
use crate::types::*;

impl GameState {
    /// Apply `mv` for the side to move.
    ///
    /// # Errors
    ///
    /// - [`MoveError::IllegalMove`] / [`MoveError::WrongColor`]: rejected, state unchanged
    /// - [`MoveError::GameOver`]: the move was played and ended the game
    /// - [`MoveError::GameAlreadyOver`]: the game had finished before this call
    pub fn apply(&mut self, mv: Move) -> MoveResult<()> {
        if self.is_game_over() {
            return Err(MoveError::GameAlreadyOver);
        }

        let next = match play_on_copy(self.position(), mv) {
            Ok(next) => next,
            Err(e) => {
                trace!("[RULES] {} rejected: {}", mv, e);
                return Err(e);
            }
        };
        *self.position_mut() = next;

        if let Some(outcome) = detect_outcome(self.position()) {
            debug!("[RULES] {} ends the game: {}", mv, outcome);
            self.position_mut().finish(outcome.result());
            return Err(MoveError::GameOver(outcome));
        }
        Ok(())
    }

    /// Parse four-character coordinate text (`"e2e4"`) and apply it.
    pub fn apply_notation(&mut self, text: &str) -> MoveResult<()> {
        let mv: Move = text.parse()?;
        self.apply(mv)
    }
}

/// Run the full move pipeline on a copy of `position`.
fn play_on_copy(position: &Position, mv: Move) -> MoveResult<Position> {
    let mover = position.turn();

    let piece = position
        .piece_at(mv.from)
        .ok_or(MoveError::illegal(IllegalReason::EmptySource))?;
    if piece.color != mover {
        return Err(MoveError::WrongColor { to_move: mover });
    }
    if !legal_destinations(&piece, position).contains(&mv.to) {
        return Err(MoveError::illegal(IllegalReason::NotLegal));
    }

    let target = position.piece_at(mv.to);
    if matches!(target, Some(t) if t.color == mover) {
        return Err(MoveError::illegal(IllegalReason::SelfCapture));
    }
    if king_exposed_after(position, &piece, mv.to, false) {
        return Err(MoveError::illegal(IllegalReason::ExposesKing));
    }

    let mut next = position.clone();
    next.tick_half_moves();

    if let Some(captured) = target {
        next.remove_piece(captured);
        next.reset_half_moves();
        revoke_for_rook_square(&mut next, captured.color, captured.kind, captured.square);
    }

    match piece.kind {
        PieceKind::Rook => revoke_for_rook_square(&mut next, mover, piece.kind, mv.from),
        PieceKind::King => {
            if mv.from.file.abs_diff(mv.to.file) == 2 {
                castle_rook(&mut next, &piece, mv)?;
            }
            next.set_castling(mover, CastlingRights::NONE);
        }
        PieceKind::Pawn => {
            next.reset_half_moves();
            if mv.from.file != mv.to.file && target.is_none() {
                capture_en_passant(&mut next, mover, mv);
            }
        }
        _ => {}
    }

    next.relocate(mv.from, mv.to);

    if is_in_check(&next, mover) {
        return Err(MoveError::illegal(IllegalReason::PinnedPiece));
    }

    if piece.kind == PieceKind::Pawn && mv.to.rank == mover.promotion_rank() {
        next.place(Piece::new(PieceKind::Queen, mover, mv.to));
    }

    next.record_move(mv);
    next.set_turn(mover.opponent());
    next.rebuild_pieces();
    Ok(next)
}

/// Drop the castling right tied to a rook corner when a rook leaves or is taken there.
fn revoke_for_rook_square(position: &mut Position, owner: Color, kind: PieceKind, square: Square) {
    if kind != PieceKind::Rook || square.rank != owner.home_rank() {
        return;
    }
    let mut rights = position.castling(owner);
    match square.file {
        QUEENSIDE_ROOK_FILE => rights.queenside = false,
        KINGSIDE_ROOK_FILE => rights.kingside = false,
        _ => return,
    }
    position.set_castling(owner, rights);
}

/// Move the rook for a castling king, re-checking that the castle is still available.
fn castle_rook(position: &mut Position, king: &Piece, mv: Move) -> MoveResult<()> {
    let mut allowed = Vec::with_capacity(2);
    castling_destinations(king, position, &mut allowed);
    if !allowed.contains(&mv.to) {
        return Err(MoveError::illegal(IllegalReason::CastlingBlocked));
    }

    let rank = mv.from.rank;
    let (rook_file, rook_dest) = if mv.to.file > mv.from.file {
        (KINGSIDE_ROOK_FILE, 5)
    } else {
        (QUEENSIDE_ROOK_FILE, 3)
    };
    position.relocate(
        Square {
            rank,
            file: rook_file,
        },
        Square {
            rank,
            file: rook_dest,
        },
    );
    Ok(())
}

/// Remove the pawn passed by a diagonal pawn move onto an empty square.
fn capture_en_passant(position: &mut Position, mover: Color, mv: Move) {
    let passed = Square {
        rank: mv.from.rank,
        file: mv.to.file,
    };
    if let Some(victim) = position.piece_at(passed) {
        if victim.kind == PieceKind::Pawn && victim.color != mover {
            position.remove_piece(victim);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(text: &str) -> Move {
        text.parse().unwrap()
    }

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_apply_updates_turn_and_history() {
        let mut game = GameState::new();
        game.apply(mv("e2e4")).unwrap();
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.history(), &[mv("e2e4")]);
        assert_eq!(
            game.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn test_rejections_leave_state_unchanged() {
        let mut game = GameState::new();
        let before = game.clone();
        assert_eq!(
            game.apply(mv("e3e4")),
            Err(MoveError::illegal(IllegalReason::EmptySource))
        );
        assert_eq!(
            game.apply(mv("e7e5")),
            Err(MoveError::WrongColor {
                to_move: Color::White
            })
        );
        assert_eq!(
            game.apply(mv("e2e5")),
            Err(MoveError::illegal(IllegalReason::NotLegal))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        let mut game = GameState::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let before = game.clone();
        assert_eq!(
            game.apply(mv("e2c3")),
            Err(MoveError::illegal(IllegalReason::ExposesKing))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_kingside_castle_moves_rook() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        game.apply(mv("e1g1")).unwrap();
        let pos = game.position();
        assert_eq!(pos.piece_at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));
        assert!(pos.is_empty(sq("h1")));
        assert_eq!(pos.castling(Color::White), CastlingRights::NONE);
    }

    #[test]
    fn test_queenside_castle_moves_rook() {
        let mut game = GameState::from_fen("r3k3/8/8/8/8/8/8/4K3 b q - 0 1").unwrap();
        game.apply(mv("e8c8")).unwrap();
        assert_eq!(game.position().piece_at(sq("d8")).map(|p| p.kind), Some(PieceKind::Rook));
        assert_eq!(game.position().castling(Color::Black), CastlingRights::NONE);
    }

    #[test]
    fn test_rook_move_revokes_matching_side() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        game.apply(mv("a1a2")).unwrap();
        let rights = game.position().castling(Color::White);
        assert!(!rights.queenside);
        assert!(rights.kingside);
    }

    #[test]
    fn test_capturing_rook_revokes_opponent_right() {
        let mut game = GameState::from_fen("r3k3/8/8/8/8/8/8/R3K3 w Qq - 0 1").unwrap();
        game.apply(mv("a1a8")).unwrap_or_else(|e| panic!("unexpected {e}"));
        assert!(!game.position().castling(Color::Black).queenside);
        assert!(!game.position().castling(Color::White).queenside);
    }

    #[test]
    fn test_en_passant_removes_passed_pawn() {
        let mut game = GameState::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
        game.apply(mv("d7d5")).unwrap();
        game.apply(mv("e5d6")).unwrap();
        assert!(game.position().is_empty(sq("d5")));
        assert_eq!(game.position().pieces().len(), 3);
        assert_eq!(game.position().half_moves(), 0);
    }

    #[test]
    fn test_promotion_to_queen() {
        let mut game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        game.apply(mv("a7a8")).unwrap();
        assert_eq!(
            game.position().piece_at(sq("a8")).map(|p| (p.kind, p.color)),
            Some((PieceKind::Queen, Color::White))
        );
    }

    #[test]
    fn test_half_move_clock() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/4P3/R3K3 w - - 5 1").unwrap();
        game.apply(mv("a1a2")).unwrap();
        assert_eq!(game.position().half_moves(), 6);
        game.apply(mv("e8d8")).unwrap();
        assert_eq!(game.position().half_moves(), 7);
        game.apply(mv("e2e4")).unwrap();
        assert_eq!(game.position().half_moves(), 0);
    }

    #[test]
    fn test_apply_notation_reports_parse_errors() {
        let mut game = GameState::new();
        assert!(matches!(
            game.apply_notation("e2"),
            Err(MoveError::Notation(_))
        ));
        assert!(game.apply_notation("g1f3").is_ok());
    }
}
