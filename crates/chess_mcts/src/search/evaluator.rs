//! Optional outcome predictor consulted by UCB1 scoring

use crate::api::GameState;
use crate::types::Color;

/// Predicted game outcome, from White's point of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeProbabilities {
    pub loss: f64,
    pub draw: f64,
    pub win: f64,
}

impl OutcomeProbabilities {
    pub const UNIFORM: OutcomeProbabilities = OutcomeProbabilities {
        loss: 1.0 / 3.0,
        draw: 1.0 / 3.0,
        win: 1.0 / 3.0,
    };

    /// Probability that `color` wins.
    pub fn win_for(&self, color: Color) -> f64 {
        match color {
            Color::White => self.win,
            Color::Black => self.loss,
        }
    }
}

/// Maps a FEN string to outcome probabilities.
///
/// Search works without one; when present, a child whose side to move is predicted to win with
/// probability above one half is always explored first.
pub trait PositionEvaluator {
    fn evaluate(&self, fen: &str) -> OutcomeProbabilities;
}

/// Logistic squash of the static evaluation score.
///
/// `scale` is the score (in pawns) at which White is given roughly a 73% win chance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicEvaluator {
    pub scale: f64,
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        HeuristicEvaluator { scale: 4.0 }
    }
}

impl PositionEvaluator for HeuristicEvaluator {
    fn evaluate(&self, fen: &str) -> OutcomeProbabilities {
        let Ok(state) = GameState::from_fen(fen) else {
            return OutcomeProbabilities::UNIFORM;
        };
        let win = 1.0 / (1.0 + (-state.evaluate() / self.scale).exp());
        OutcomeProbabilities {
            loss: 1.0 - win,
            draw: 0.0,
            win,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::START_FEN;

    #[test]
    fn test_balanced_position_is_even() {
        let p = HeuristicEvaluator::default().evaluate(START_FEN);
        assert!((p.win - 0.5).abs() < 1e-9);
        assert!((p.loss - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_extra_heavy_pieces_favour_owner() {
        let p = HeuristicEvaluator::default().evaluate("4k3/8/8/8/8/8/8/R2QK3 b - - 0 1");
        assert!(p.win_for(Color::White) > 0.9);
        assert!(p.win_for(Color::Black) < 0.1);
    }

    #[test]
    fn test_bad_fen_is_uniform() {
        let p = HeuristicEvaluator::default().evaluate("not a fen");
        assert_eq!(p, OutcomeProbabilities::UNIFORM);
    }
}
