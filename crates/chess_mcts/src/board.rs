//! # Position - Board Grid, Piece List and Game Counters
//!
//! ## Overview
//!
//! [`Position`] owns every piece of mutable chess state:
//! 1. **Grid** (`[[Option<Piece>; 8]; 8]`) indexed `[rank][file]`
//! 2. **Piece list** kept in sync with the grid after every structural change
//! 3. **King handles** so "find my king" is a constant-time lookup
//! 4. **Turn, castling rights, move history, clocks and result**
//!
//! The whole struct is a flat value: cloning it is one memcpy for the grid plus two small
//! vector copies. Speculative moves, rollbacks and search rollouts all rely on that, so nothing
//! here is shared or reference counted.
//!
//! ## FEN
//!
//! [`Position::from_fen`] and [`Position::fen`] read and write the standard six-field notation.
//! En passant targets are not tracked; the fourth field is always written as `-` and ignored on
//! input (pawn logic derives en passant from the last history entry instead).

use std::fmt;

use smallvec::SmallVec;

use crate::constants::START_FEN;
use crate::error::FenError;
use crate::types::*;

pub type Grid = [[Option<Piece>; 8]; 8];
pub type PieceList = SmallVec<[Piece; 32]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    grid: Grid,
    pieces: PieceList,
    kings: [Option<Square>; 2],
    turn: Color,
    history: Vec<Move>,
    castling: [CastlingRights; 2],
    half_moves: u32,
    plies: u32,
    game_over: bool,
    result: Option<GameResult>,
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl Position {
    /// Empty board, White to move, no castling rights.
    pub fn empty() -> Position {
        Position {
            grid: [[None; 8]; 8],
            pieces: PieceList::new(),
            kings: [None, None],
            turn: Color::White,
            history: Vec::new(),
            castling: [CastlingRights::NONE; 2],
            half_moves: 0,
            plies: 0,
            game_over: false,
            result: None,
        }
    }

    /// Standard starting position.
    pub fn start() -> Position {
        match Position::from_fen(START_FEN) {
            Ok(position) => position,
            Err(e) => unreachable!("start FEN is valid: {e}"),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount {
                found: fields.len(),
            });
        }

        let mut position = Position::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount { found: ranks.len() });
        }
        // FEN lists rank 8 first
        for (i, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file = file
                        .checked_add(skip as u8)
                        .filter(|&f| f <= 8)
                        .ok_or(FenError::RankWidth { rank: i + 1 })?;
                    continue;
                }
                let kind = PieceKind::from_letter(c).ok_or(FenError::UnknownPiece { letter: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let square = Square::new(rank, file).ok_or(FenError::RankWidth { rank: i + 1 })?;
                position.place(Piece::new(kind, color, square));
                file += 1;
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: i + 1 });
            }
        }

        position.turn = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::ActiveColor {
                    color: other.to_string(),
                })
            }
        };

        if fields[2] != "-" {
            for c in fields[2].chars() {
                let (color, kingside) = match c {
                    'K' => (Color::White, true),
                    'Q' => (Color::White, false),
                    'k' => (Color::Black, true),
                    'q' => (Color::Black, false),
                    _ => {
                        return Err(FenError::Castling {
                            field: fields[2].to_string(),
                        })
                    }
                };
                let rights = &mut position.castling[color.index()];
                if kingside {
                    rights.kingside = true;
                } else {
                    rights.queenside = true;
                }
            }
        }

        position.half_moves = fields[4].parse().map_err(|_| FenError::Counter {
            value: fields[4].to_string(),
        })?;
        let full_moves: u32 = fields[5].parse().map_err(|_| FenError::Counter {
            value: fields[5].to_string(),
        })?;
        let side_offset = match position.turn {
            Color::White => 0,
            Color::Black => 1,
        };
        position.plies = full_moves
            .saturating_sub(1)
            .checked_mul(2)
            .and_then(|plies| plies.checked_add(side_offset))
            .ok_or_else(|| FenError::Counter {
                value: fields[5].to_string(),
            })?;

        position.rebuild_pieces();
        for color in [Color::White, Color::Black] {
            let found = position
                .pieces
                .iter()
                .filter(|p| p.kind == PieceKind::King && p.color == color)
                .count();
            if found != 1 {
                return Err(FenError::KingCount { color, found });
            }
        }

        Ok(position)
    }

    /// Piece-placement field of the FEN (ranks high to low).
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.grid[rank][file] {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    pub fn castling_field(&self) -> String {
        let mut out = String::new();
        let white = self.castling[Color::White.index()];
        let black = self.castling[Color::Black.index()];
        if white.kingside {
            out.push('K');
        }
        if white.queenside {
            out.push('Q');
        }
        if black.kingside {
            out.push('k');
        }
        if black.queenside {
            out.push('q');
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }

    /// Full FEN text. The en passant field is always `-`.
    pub fn fen(&self) -> String {
        format!(
            "{} {} {} - {} {}",
            self.placement(),
            self.turn.fen_char(),
            self.castling_field(),
            self.half_moves,
            self.fullmove_number()
        )
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.rank as usize][square.file as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    /// Square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    pub fn half_moves(&self) -> u32 {
        self.half_moves
    }

    /// Half-moves played since the position's first move.
    pub fn plies(&self) -> u32 {
        self.plies
    }

    pub fn fullmove_number(&self) -> u32 {
        self.plies / 2 + 1
    }

    pub fn castling(&self, color: Color) -> CastlingRights {
        self.castling[color.index()]
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Put `piece` on its square, replacing whatever stood there.
    pub(crate) fn place(&mut self, piece: Piece) {
        let Square { rank, file } = piece.square;
        self.pieces.retain(|p| p.square != piece.square);
        self.grid[rank as usize][file as usize] = Some(piece);
        self.pieces.push(piece);
        if piece.kind == PieceKind::King {
            self.kings[piece.color.index()] = Some(piece.square);
        }
    }

    /// Empty `square`, returning the piece that stood there.
    pub(crate) fn clear(&mut self, square: Square) -> Option<Piece> {
        let taken = self.grid[square.rank as usize][square.file as usize].take();
        if let Some(piece) = taken {
            self.pieces.retain(|p| p.square != square);
            if piece.kind == PieceKind::King && self.kings[piece.color.index()] == Some(square) {
                self.kings[piece.color.index()] = None;
            }
        }
        taken
    }

    /// Move the piece on `from` to `to`, capturing anything on `to`.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mut piece = self.clear(from)?;
        let captured = self.clear(to);
        piece.square = to;
        self.place(piece);
        captured
    }

    /// Remove a captured piece, matched by its `(kind, color, square)` identity.
    pub(crate) fn remove_piece(&mut self, piece: Piece) -> bool {
        match self.piece_at(piece.square) {
            Some(found) if found == piece => {
                self.clear(piece.square);
                true
            }
            _ => false,
        }
    }

    /// Rebuild the piece list and king handles by scanning the grid.
    pub(crate) fn rebuild_pieces(&mut self) {
        self.pieces.clear();
        self.kings = [None, None];
        for square in Square::all() {
            if let Some(piece) = self.piece_at(square) {
                if piece.kind == PieceKind::King {
                    self.kings[piece.color.index()] = Some(square);
                }
                self.pieces.push(piece);
            }
        }
    }

    pub(crate) fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    pub(crate) fn set_castling(&mut self, color: Color, rights: CastlingRights) {
        self.castling[color.index()] = rights;
    }

    pub(crate) fn record_move(&mut self, mv: Move) {
        self.history.push(mv);
        self.plies = self.plies.saturating_add(1);
    }

    pub(crate) fn tick_half_moves(&mut self) {
        self.half_moves = self.half_moves.saturating_add(1);
    }

    pub(crate) fn reset_half_moves(&mut self) {
        self.half_moves = 0;
    }

    pub(crate) fn finish(&mut self, result: GameResult) {
        self.game_over = true;
        self.result = Some(result);
    }

    /// Check that the grid and the piece list describe the same board.
    pub fn is_consistent(&self) -> bool {
        let on_grid = Square::all().filter(|sq| self.piece_at(*sq).is_some()).count();
        on_grid == self.pieces.len()
            && self
                .pieces
                .iter()
                .all(|p| self.piece_at(p.square) == Some(*p))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = self
                    .piece_at(Square { rank, file })
                    .map(|p| p.fen_char())
                    .unwrap_or('.');
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_round_trips_fen() {
        let position = Position::start();
        assert_eq!(position.fen(), START_FEN);
        assert_eq!(position.pieces().len(), 32);
        assert!(position.is_consistent());
    }

    #[test]
    fn test_king_handles_follow_fen() {
        let position = Position::start();
        assert_eq!(position.king_square(Color::White), Square::new(0, 4));
        assert_eq!(position.king_square(Color::Black), Square::new(7, 4));
    }

    #[test]
    fn test_fen_counters_and_rights() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b Q - 12 40").unwrap();
        assert_eq!(position.turn(), Color::Black);
        assert_eq!(position.half_moves(), 12);
        assert_eq!(position.fullmove_number(), 40);
        assert!(position.castling(Color::White).queenside);
        assert!(!position.castling(Color::White).kingside);
        assert_eq!(position.castling(Color::Black), CastlingRights::NONE);
        assert_eq!(position.fen(), "4k3/8/8/8/8/8/8/R3K3 b Q - 12 40");
    }

    #[test]
    fn test_fen_rejects_missing_king() {
        let err = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err();
        assert_eq!(
            err,
            FenError::KingCount {
                color: Color::Black,
                found: 0
            }
        );
    }

    #[test]
    fn test_fen_rejects_bad_rank_width() {
        assert!(matches!(
            Position::from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::RankWidth { rank: 2 })
        ));
    }

    #[test]
    fn test_fen_rejects_long_digit_runs() {
        let fen = format!("{}/8/8/8/8/8/8/4K2k w - - 0 1", "9".repeat(30));
        assert!(matches!(
            Position::from_fen(&fen),
            Err(FenError::RankWidth { rank: 1 })
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            Ok(_)
        ));
    }

    #[test]
    fn test_fen_rejects_overflowing_move_number() {
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 4294967295"),
            Err(FenError::Counter { .. })
        ));
        let late = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 2147483648").unwrap();
        assert_eq!(late.plies(), u32::MAX);
    }

    #[test]
    fn test_relocate_keeps_grid_and_list_in_sync() {
        let mut position = Position::start();
        let e2 = Square::new(1, 4).unwrap();
        let e4 = Square::new(3, 4).unwrap();
        assert_eq!(position.relocate(e2, e4), None);
        assert!(position.is_empty(e2));
        assert_eq!(position.piece_at(e4).map(|p| p.square), Some(e4));
        assert!(position.is_consistent());
    }

    #[test]
    fn test_remove_piece_matches_identity() {
        let mut position = Position::start();
        let d7 = Square::new(6, 3).unwrap();
        let wrong = Piece::new(PieceKind::Knight, Color::Black, d7);
        assert!(!position.remove_piece(wrong));
        let pawn = Piece::new(PieceKind::Pawn, Color::Black, d7);
        assert!(position.remove_piece(pawn));
        assert_eq!(position.pieces().len(), 31);
        assert!(position.is_consistent());
    }
}
