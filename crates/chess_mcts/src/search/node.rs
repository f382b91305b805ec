//! Search tree nodes

use crate::api::GameState;
use crate::hash::fingerprint;
use crate::types::{Color, GameResult, Move};

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// One position in the search tree.
///
/// `wins` accumulates rollout results on White's scale (1 White win, 0 Black win, 0.5 draw)
/// regardless of whose move it is at this node.
#[derive(Debug, Clone)]
pub struct Node {
    pub state: GameState,
    pub fingerprint: u64,
    pub parent: Option<NodeId>,
    /// Move that produced `state` from the parent's state
    pub mv: Option<Move>,
    pub children: Vec<NodeId>,
    pub visits: u32,
    pub wins: f64,
    pub alpha: f64,
    pub beta: f64,
    /// Candidate moves not yet tried by expansion
    pub(crate) untried: Vec<Move>,
    /// Tried moves that ended the game, with their result
    pub terminal: Vec<(Move, GameResult)>,
}

impl Node {
    pub fn new(
        state: GameState,
        parent: Option<NodeId>,
        mv: Option<Move>,
        alpha: f64,
        beta: f64,
    ) -> Node {
        let untried = if state.is_game_over() {
            Vec::new()
        } else {
            state.candidate_moves()
        };
        Node {
            fingerprint: fingerprint(&state),
            state,
            parent,
            mv,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
            alpha,
            beta,
            untried,
            terminal: Vec::new(),
        }
    }

    /// Fresh root with open bounds.
    pub fn root(state: GameState) -> Node {
        Node::new(state, None, None, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Every candidate move has been tried: each legal one that did not end the game has a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// A tried move that wins the game outright for the side to move here.
    pub fn winning_move(&self) -> Option<Move> {
        let winner = GameResult::win_for(self.state.turn());
        self.terminal
            .iter()
            .find(|(_, result)| *result == winner)
            .map(|(mv, _)| *mv)
    }

    /// Mean result on White's scale, `None` before the first visit.
    pub fn mean(&self) -> Option<f64> {
        (self.visits > 0).then(|| self.wins / self.visits as f64)
    }

    /// UCB1 score of this node as a child of a parent visited `parent_visits` times.
    ///
    /// The exploitation term is the mean result for `chooser`, the side picking among the
    /// parent's children. Unvisited nodes score `+inf`.
    pub fn ucb1(&self, parent_visits: u32, exploration: f64, chooser: Color) -> f64 {
        let Some(mean) = self.mean() else {
            return f64::INFINITY;
        };
        let exploit = match chooser {
            Color::White => mean,
            Color::Black => 1.0 - mean,
        };
        let parent = parent_visits.max(1) as f64;
        exploit + exploration * (parent.ln() / self.visits as f64).sqrt()
    }
}
