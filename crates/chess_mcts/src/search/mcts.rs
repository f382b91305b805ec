//! MCTS driver
//!
//! Each call to [`Mcts::select_move`] runs a fixed number of iterations of
//! select → expand → simulate → backpropagate below the current node, then returns the move
//! leading to the best child and advances the cursor there. The tree is kept between calls so
//! the next search starts from the statistics already gathered for the opponent's reply.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use super::book::OpeningBook;
use super::evaluator::PositionEvaluator;
use super::node::{Node, NodeId};
use super::tree::Tree;
use crate::api::GameState;
use crate::config::SearchConfig;
use crate::constants::{RESULT_BLACK_WIN, RESULT_DRAW, RESULT_WHITE_WIN};
use crate::error::{ConfigError, MoveError, SearchError, SearchResult};
use crate::hash::{fingerprint, TableStats, TranspositionTable};
use crate::types::{Color, GameResult, Move};

pub struct Mcts {
    config: SearchConfig,
    tree: Tree,
    current: NodeId,
    table: TranspositionTable,
    book: OpeningBook,
    evaluator: Option<Box<dyn PositionEvaluator>>,
    rng: StdRng,
}

impl Mcts {
    /// Engine rooted at the standard starting position.
    pub fn new(config: SearchConfig) -> Result<Mcts, ConfigError> {
        Mcts::with_root(GameState::new(), config)
    }

    pub fn with_root(root: GameState, config: SearchConfig) -> Result<Mcts, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Mcts {
            table: TranspositionTable::new(config.table),
            book: OpeningBook::standard(),
            tree: Tree::new(root),
            current: Tree::ROOT,
            evaluator: None,
            rng,
            config,
        })
    }

    pub fn with_evaluator(mut self, evaluator: impl PositionEvaluator + 'static) -> Mcts {
        self.evaluator = Some(Box::new(evaluator));
        self
    }

    pub fn with_book(mut self, book: OpeningBook) -> Mcts {
        self.book = book;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn current_node(&self) -> &Node {
        self.tree.get(self.current)
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    pub fn table_stats(&self) -> TableStats {
        self.table.stats()
    }

    /// Pick a move for the side to move in `state`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::GameOver`] when `state` is already finished
    /// - [`SearchError::NoLegalMoves`] when nothing can be played
    /// - [`SearchError::Invariant`] when a rollout trips over a rules-engine defect
    pub fn select_move(&mut self, state: &GameState) -> SearchResult<Move> {
        if state.is_game_over() {
            return Err(SearchError::GameOver);
        }
        // A position loaded mid-game can be mate or stalemate without being marked finished
        if state.legal_moves().is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        self.sync_cursor(state);

        if self.config.use_book {
            if let Some(mv) = self.book.lookup(&state.placement()) {
                if state.legal_moves().contains(&mv) {
                    debug!("[MCTS] Book move {}", mv);
                    return Ok(mv);
                }
                warn!("[MCTS] Book move {} is not legal here, searching instead", mv);
            }
        }

        for _ in 0..self.config.iterations {
            self.iterate()?;
        }

        if let Some(mv) = self.current_node().winning_move() {
            debug!("[MCTS] {} wins immediately", mv);
            return Ok(mv);
        }

        let Some(best) = self.best_child(self.current, f64::INFINITY) else {
            warn!("[MCTS] No child after search, falling back to first legal move");
            return state
                .legal_moves()
                .first()
                .copied()
                .ok_or(SearchError::NoLegalMoves);
        };

        let node = self.tree.get(best);
        let mv = node.mv.ok_or_else(|| SearchError::Invariant {
            message: format!("child node {best} has no move"),
        })?;
        let stats = self.table.stats();
        debug!(
            "[MCTS] {} after {} iterations: {} visits, mean {:.3}, tree {} nodes, tt {} hits / {} misses",
            mv,
            self.config.iterations,
            node.visits,
            node.mean().unwrap_or(RESULT_DRAW),
            self.tree.len(),
            stats.hits,
            stats.misses
        );
        self.current = best;
        Ok(mv)
    }

    /// Point the cursor at the node holding `state`: the current node, one of its children,
    /// anywhere in the tree, or a fresh tree.
    fn sync_cursor(&mut self, state: &GameState) {
        if self.tree.get(self.current).state == *state {
            return;
        }
        if let Some(id) = self.tree.find_child(self.current, state) {
            self.current = id;
            return;
        }
        if let Some(id) = self.tree.find(state) {
            trace!("[MCTS] Cursor moved to node {}", id);
            self.current = id;
            return;
        }
        debug!("[MCTS] Position not in tree, starting a fresh tree");
        self.tree = Tree::new(state.clone());
        self.current = Tree::ROOT;
    }

    fn iterate(&mut self) -> SearchResult<()> {
        let leaf = self.select(self.current);
        let node = {
            let n = self.tree.get(leaf);
            if n.state.is_game_over() || n.is_fully_expanded() {
                leaf
            } else {
                self.expand(leaf)?
            }
        };
        let result = self.simulate(node)?;
        self.tree.backpropagate(node, result);
        self.remember(node);
        Ok(())
    }

    fn select(&mut self, mut id: NodeId) -> NodeId {
        let mut depth = 0u32;
        loop {
            let node = self.tree.get(id);
            if node.state.is_game_over() || !node.is_fully_expanded() {
                return id;
            }
            if self.config.max_depth.is_some_and(|limit| depth >= limit) {
                return id;
            }
            let (fp, turn, alpha, beta) = (node.fingerprint, node.state.turn(), node.alpha, node.beta);
            if let Some(entry) = self.table.lookup(fp) {
                if bound_cuts(turn, entry.value, alpha, beta) {
                    trace!("[MCTS] Bound cut at node {}", id);
                    return id;
                }
            }
            match self.best_child(id, beta) {
                Some(child) => {
                    id = child;
                    depth += 1;
                }
                None => return id,
            }
        }
    }

    /// Child of `id` with the highest score, skipping children whose `alpha` exceeds `beta`.
    /// Ties go to the child created first.
    fn best_child(&self, id: NodeId, beta: f64) -> Option<NodeId> {
        let node = self.tree.get(id);
        let chooser = node.state.turn();
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &node.children {
            if self.tree.get(child).alpha > beta {
                continue;
            }
            let score = self.score(child, node.visits, chooser);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((child, score)),
            }
        }
        best.map(|(child, _)| child)
    }

    fn score(&self, id: NodeId, parent_visits: u32, chooser: Color) -> f64 {
        let node = self.tree.get(id);
        if node.visits == 0 {
            return f64::INFINITY;
        }
        if let Some(evaluator) = &self.evaluator {
            let predicted = evaluator.evaluate(&node.state.fen());
            if predicted.win_for(node.state.turn()) > 0.5 {
                return f64::INFINITY;
            }
        }
        node.ucb1(parent_visits, self.config.exploration, chooser)
    }

    /// Try untried moves of `id` in random order until one yields a new child.
    ///
    /// Returns `id` itself when the drawn move ends the game or nothing is left to try.
    fn expand(&mut self, id: NodeId) -> SearchResult<NodeId> {
        loop {
            let node = self.tree.get_mut(id);
            if node.untried.is_empty() {
                return Ok(id);
            }
            let index = self.rng.random_range(0..node.untried.len());
            let mv = node.untried.swap_remove(index);
            let mut next = node.state.clone();
            match next.apply(mv) {
                Ok(()) => return Ok(self.tree.add_child(id, next, mv)),
                Err(MoveError::GameOver(outcome)) => {
                    trace!("[MCTS] {} ends the game ({}), no child", mv, outcome);
                    node.terminal.push((mv, outcome.result()));
                    return Ok(id);
                }
                Err(e) if e.is_recoverable() => continue,
                Err(e) => {
                    return Err(SearchError::Invariant {
                        message: format!("expanding {mv}: {e}"),
                    })
                }
            }
        }
    }

    /// Random playout from `id`, pruned by cached bounds.
    fn simulate(&mut self, id: NodeId) -> SearchResult<f64> {
        let (mut state, mut alpha, mut beta) = {
            let node = self.tree.get(id);
            (node.state.clone(), node.alpha, node.beta)
        };

        let mut pruned = None;
        while !state.is_game_over() {
            if let Some(entry) = self.table.lookup(fingerprint(&state)) {
                match state.turn() {
                    Color::White => {
                        if entry.value >= beta {
                            pruned = Some(RESULT_BLACK_WIN);
                            break;
                        }
                        alpha = alpha.max(entry.value);
                    }
                    Color::Black => {
                        if entry.value <= alpha {
                            pruned = Some(RESULT_WHITE_WIN);
                            break;
                        }
                        beta = beta.min(entry.value);
                    }
                }
            }
            match state.play_random_move(&mut self.rng) {
                Ok(_) | Err(MoveError::GameOver(_)) => {}
                Err(e) => {
                    return Err(SearchError::Invariant {
                        message: format!("rollout from {}: {e}", state.fen()),
                    })
                }
            }
        }

        let node = self.tree.get_mut(id);
        node.alpha = alpha;
        node.beta = beta;
        Ok(match pruned {
            Some(result) => result,
            None => state.result().map_or(RESULT_DRAW, GameResult::value),
        })
    }

    /// Cache the node's mean result under its fingerprint.
    fn remember(&mut self, id: NodeId) {
        let node = self.tree.get(id);
        if let (Some(mv), Some(mean)) = (node.mv, node.mean()) {
            self.table.store(node.fingerprint, mean, mv);
        }
    }
}

/// White stops once a cached value reaches `beta`; Black once it falls to `alpha`.
fn bound_cuts(turn: Color, value: f64, alpha: f64, beta: f64) -> bool {
    match turn {
        Color::White => value >= beta,
        Color::Black => value <= alpha,
    }
}
