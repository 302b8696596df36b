//! Transposition-aware search memory.
//!
//! Instead of a pointer tree, positions are looked up by value in two flat
//! maps. Different move orders that reach the same position share one entry,
//! and there are no parent links to keep consistent.

use crate::node::NodeStats;
use ox_core::GameState;
use std::collections::HashMap;

/// Search memory keyed by position.
///
/// - `stats`: visits and accumulated reward for every position seen
/// - `children`: expansion results; an entry means "expanded", an empty list
///   means "expanded and terminal"
#[derive(Debug)]
pub struct Tree<S: GameState> {
    stats: HashMap<S, NodeStats>,
    children: HashMap<S, Vec<(S::Action, S)>>,
}

impl<S: GameState> Tree<S> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            stats: HashMap::new(),
            children: HashMap::new(),
        }
    }

    /// Count one visit to `state` and add `reward` to its total.
    ///
    /// Positions without an entry start at zero.
    pub fn record_visit(&mut self, state: &S, reward: f64) {
        match self.stats.get_mut(state) {
            Some(stats) => stats.record(reward),
            None => {
                let mut stats = NodeStats::default();
                stats.record(reward);
                self.stats.insert(state.clone(), stats);
            }
        }
    }

    /// Generate the successors of `state`, once.
    ///
    /// Terminal positions get an empty child list. Successors are stored in
    /// `legal_actions()` order, which every tie-break relies on. Calling this
    /// again for the same position is a no-op.
    pub fn expand(&mut self, state: &S) {
        if self.children.contains_key(state) {
            return;
        }

        let children = if state.is_terminal() {
            Vec::new()
        } else {
            state
                .legal_actions()
                .into_iter()
                .map(|action| {
                    let mut child = state.clone();
                    child.apply(&action);
                    (action, child)
                })
                .collect()
        };

        self.children.insert(state.clone(), children);
    }

    /// Statistics for `state`, if it was ever visited.
    pub fn stats(&self, state: &S) -> Option<&NodeStats> {
        self.stats.get(state)
    }

    /// Statistics for `state`, zero if it was never visited.
    pub fn stats_or_default(&self, state: &S) -> NodeStats {
        self.stats.get(state).copied().unwrap_or_default()
    }

    /// Expanded successors of `state`, or `None` if not yet expanded.
    pub fn children(&self, state: &S) -> Option<&[(S::Action, S)]> {
        self.children.get(state).map(Vec::as_slice)
    }

    /// Whether `state` has been expanded.
    pub fn is_expanded(&self, state: &S) -> bool {
        self.children.contains_key(state)
    }

    /// Every visited position with its statistics, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &NodeStats)> {
        self.stats.iter()
    }

    /// Number of positions with statistics.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Number of expanded positions.
    pub fn num_expanded(&self) -> usize {
        self.children.len()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.stats.clear();
        self.children.clear();
    }
}

impl<S: GameState> Default for Tree<S> {
    fn default() -> Self {
        Self::new()
    }
}
