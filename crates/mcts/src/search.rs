//! Monte Carlo Tree Search implementation.
//!
//! Each playout runs four phases against the transposition-keyed [`Tree`]:
//!
//! 1. **Selection**: walk down expanded positions, stopping at the first
//!    unexpanded successor or descending by UCT
//! 2. **Expansion**: generate the frontier's successors (once per position)
//! 3. **Simulation**: ask the [`Evaluator`] for the frontier's value
//! 4. **Backpropagation**: fold the value back up the path, flipping sign at
//!    every level
//!
//! Every tie-break (unexpanded successor, UCT score, final recommendation)
//! goes to the first candidate in the position's `legal_actions()` order.

use crate::{
    config::MctsConfig,
    evaluator::Evaluator,
    node::{average_score, uct_score, NodeStats},
    tree::Tree,
};
use ox_core::{GameState, OxError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

/// Search statistics for one root action.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildSummary<A> {
    /// Action taken from the root.
    pub action: A,

    /// Playouts that went through the successor.
    pub visits: u64,

    /// Mean reward of the successor from the root mover's perspective.
    pub mean_reward: Option<f64>,
}

/// Monte Carlo Tree Search with UCT selection.
///
/// Generic over:
/// - `S`: The game position being searched
/// - `E`: The simulation strategy
/// - `R`: The random number generator (used for the unexpanded-root fallback)
///
/// The tree persists across calls so knowledge gathered for one move is
/// reused when the game reaches a known position later. Call [`Mcts::reset`]
/// to drop it.
pub struct Mcts<S: GameState, E: Evaluator<S>, R: Rng> {
    config: MctsConfig,
    evaluator: E,
    rng: R,
    tree: Tree<S>,
}

impl<S, E, R> Mcts<S, E, R>
where
    S: GameState,
    E: Evaluator<S>,
    R: Rng,
{
    /// Create a new MCTS instance with an empty tree.
    pub fn new(config: MctsConfig, evaluator: E, rng: R) -> Self {
        Self {
            config,
            evaluator,
            rng,
            tree: Tree::new(),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Read access to the search memory.
    pub fn tree(&self) -> &Tree<S> {
        &self.tree
    }

    /// Drop all statistics and expansions.
    pub fn reset(&mut self) {
        self.tree.clear();
    }

    /// Run exactly one playout from `root`.
    pub fn search(&mut self, root: &S) {
        let path = self.select(root);
        let Some(frontier) = path.last() else {
            return;
        };

        self.expand(frontier);
        let reward = self.simulate(frontier);
        trace!(depth = path.len(), reward, "playout");
        self.backpropagate(&path, reward);
    }

    /// Selection: the path from `root` down to the frontier.
    ///
    /// The walk stops at a position that is unexpanded or has no children.
    /// Otherwise, if any successor is unexpanded, the first one is appended
    /// and the walk stops there. If every successor is expanded, the walk
    /// descends to the child with the highest UCT score.
    pub fn select(&self, root: &S) -> Vec<S> {
        let mut path = Vec::new();
        let mut current = root.clone();

        loop {
            let children = match self.tree.children(&current) {
                Some(children) if !children.is_empty() => children,
                _ => {
                    path.push(current);
                    return path;
                }
            };

            if let Some((_, child)) = children
                .iter()
                .find(|(_, child)| !self.tree.is_expanded(child))
            {
                let child = child.clone();
                path.push(current);
                path.push(child);
                return path;
            }

            let Some(next) = self.uct_select(&current, children) else {
                path.push(current);
                return path;
            };
            let next = next.clone();
            path.push(current);
            current = next;
        }
    }

    /// Child with the highest UCT score; the first one wins ties.
    fn uct_select<'a>(&self, parent: &S, children: &'a [(S::Action, S)]) -> Option<&'a S> {
        let parent_visits = self.tree.stats_or_default(parent).visits;
        let mut best: Option<(&S, f64)> = None;

        for (_, child) in children {
            let score = uct_score(
                &self.tree.stats_or_default(child),
                parent_visits,
                self.config.exploration,
            );
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child, score)),
            }
        }

        best.map(|(child, _)| child)
    }

    /// Expansion: generate the successors of `state` if not done already.
    pub fn expand(&mut self, state: &S) {
        self.tree.expand(state);
    }

    /// Simulation: value of `state` for the player to move there.
    pub fn simulate(&mut self, state: &S) -> f64 {
        self.evaluator.evaluate(state)
    }

    /// Backpropagation: record `reward` along `path`, frontier first.
    ///
    /// The reward is negated before each record. A result that is good for
    /// the player to move at a position is bad for the player who moved into
    /// it, and each position stores the latter.
    pub fn backpropagate(&mut self, path: &[S], reward: f64) {
        let mut reward = reward;

        for state in path.iter().rev() {
            reward = -reward;
            self.tree.record_visit(state, reward);
        }
    }

    /// Best action at `root` according to the statistics gathered so far.
    ///
    /// Returns `None` if `root` was never expanded or has no successors.
    /// Never runs any search.
    pub fn recommend(&self, root: &S) -> Option<S::Action> {
        let children = self.tree.children(root)?;
        let mut best: Option<(&S::Action, f64)> = None;

        for (action, child) in children {
            let score = average_score(&self.tree.stats_or_default(child));
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((action, score)),
            }
        }

        best.map(|(action, _)| action.clone())
    }

    /// Action to play at `root`.
    ///
    /// Uses [`Mcts::recommend`] when `root` has been expanded, and falls back
    /// to a uniformly random legal action when it has not.
    ///
    /// # Errors
    /// Returns `OxError::NoLegalActions` if `root` has no legal actions.
    pub fn best_action(&mut self, root: &S) -> Result<S::Action> {
        if !self.tree.is_expanded(root) {
            return root
                .legal_actions()
                .choose(&mut self.rng)
                .cloned()
                .ok_or(OxError::NoLegalActions);
        }

        self.recommend(root).ok_or(OxError::NoLegalActions)
    }

    /// Per-action statistics at `root`, in action order.
    ///
    /// Empty if `root` was never expanded.
    pub fn root_children(&self, root: &S) -> Vec<ChildSummary<S::Action>> {
        self.tree
            .children(root)
            .unwrap_or_default()
            .iter()
            .map(|(action, child)| {
                let stats: NodeStats = self.tree.stats_or_default(child);
                ChildSummary {
                    action: action.clone(),
                    visits: stats.visits,
                    mean_reward: stats.mean_reward(),
                }
            })
            .collect()
    }
}
