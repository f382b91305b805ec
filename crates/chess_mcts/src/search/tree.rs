//! Arena-backed search tree
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]. Children are owned through the
//! parent's `children` list; the parent link is a plain index, so there is no reference cycle
//! to break. Nodes are never removed during a search: the whole tree is kept so later searches
//! can reuse it, and is only discarded when the cursor cannot be placed anywhere inside it.

use std::collections::VecDeque;

use super::node::{Node, NodeId};
use crate::api::GameState;
use crate::types::Move;

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub const ROOT: NodeId = 0;

    pub fn new(root: GameState) -> Tree {
        Tree {
            nodes: vec![Node::root(root)],
        }
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach `state` under `parent`, inheriting the parent's bounds.
    pub fn add_child(&mut self, parent: NodeId, state: GameState, mv: Move) -> NodeId {
        let (alpha, beta) = {
            let p = &self.nodes[parent];
            (p.alpha, p.beta)
        };
        let id = self.nodes.len();
        self.nodes
            .push(Node::new(state, Some(parent), Some(mv), alpha, beta));
        self.nodes[parent].children.push(id);
        id
    }

    /// Child of `parent` whose state equals `state`.
    pub fn find_child(&self, parent: NodeId, state: &GameState) -> Option<NodeId> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&id| self.nodes[id].state == *state)
    }

    /// Breadth-first search from the root for a node holding `state`.
    pub fn find(&self, state: &GameState) -> Option<NodeId> {
        let mut queue = VecDeque::from([Tree::ROOT]);
        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id];
            if node.state == *state {
                return Some(id);
            }
            queue.extend(node.children.iter().copied());
        }
        None
    }

    /// Add one visit and `result` to `id` and every ancestor.
    pub fn backpropagate(&mut self, id: NodeId, result: f64) {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &mut self.nodes[current];
            node.visits += 1;
            node.wins += result;
            cursor = node.parent;
        }
    }
}
