//! Monte-Carlo tree search with alpha/beta bounds
//!
//! This module implements the move planner using:
//! - UCB1 selection over an arena-backed tree that persists across moves
//! - Random expansion and random playouts driven by an injectable seeded RNG
//! - Transposition-table bound checks that cut selection and playouts short
//! - An opening book consulted before any search
//!
//! Rollout results are always on White's scale (1 White win, 0 Black win, 0.5 draw);
//! selection flips the exploitation term when Black is choosing.
//!
//! ## Module Organization
//!
//! - `node` - tree node, UCB1 scoring
//! - `tree` - node arena, cursor lookups, backpropagation
//! - `mcts` - the search driver
//! - `book` - opening book
//! - `evaluator` - optional outcome predictor for UCB1

mod book;
mod evaluator;
mod mcts;
mod node;
mod tree;

pub use book::OpeningBook;
pub use evaluator::{HeuristicEvaluator, OutcomeProbabilities, PositionEvaluator};
pub use mcts::Mcts;
pub use node::{Node, NodeId};
pub use tree::Tree;
