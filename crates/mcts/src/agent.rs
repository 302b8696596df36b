//! Time-budgeted driver around [`Mcts`].
//!
//! An `Agent` owns one search engine for a whole game. Each decision runs
//! playouts until the budget is spent, then reads off the best action. The
//! engine's tree is kept between decisions unless
//! [`MctsConfig::reset_between_moves`] is set.

use crate::{config::MctsConfig, evaluator::Evaluator, search::Mcts};
use ox_core::{GameState, OxError, Result};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::debug;

/// What the last decision cost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchReport {
    /// Completed playouts.
    pub playouts: usize,

    /// Wall-clock time spent searching and extracting the action.
    pub elapsed: Duration,

    /// Positions with statistics after the search.
    pub tree_size: usize,
}

/// MCTS player.
pub struct Agent<S: GameState, E: Evaluator<S>, R: Rng> {
    mcts: Mcts<S, E, R>,
    last_search: Option<SearchReport>,
}

impl<S, E, R> Agent<S, E, R>
where
    S: GameState,
    E: Evaluator<S>,
    R: Rng,
{
    /// Create an agent with a fresh engine.
    ///
    /// # Errors
    /// Returns `OxError::InvalidConfig` if `config` fails validation.
    pub fn new(config: MctsConfig, evaluator: E, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            mcts: Mcts::new(config, evaluator, rng),
            last_search: None,
        })
    }

    /// The engine, for inspecting statistics.
    pub fn engine(&self) -> &Mcts<S, E, R> {
        &self.mcts
    }

    /// Report of the most recent decision.
    pub fn last_search(&self) -> Option<SearchReport> {
        self.last_search
    }

    /// Search `root` for at most `budget_fraction` of `budget`, then return
    /// the best action.
    ///
    /// The clock is only checked between playouts: a playout that has
    /// started always finishes, so the call can overrun by at most one
    /// playout. If the budget runs out before any playout completes, a
    /// random legal action is returned.
    ///
    /// # Errors
    /// Returns `OxError::NoLegalActions` if `root` has no legal actions.
    pub fn choose_action(&mut self, root: &S, budget: Duration) -> Result<S::Action> {
        let start = Instant::now();
        self.prepare(root)?;

        let config = self.mcts.config();
        let deadline = budget.mul_f64(config.budget_fraction);
        let cap = config.max_playouts.unwrap_or(usize::MAX);

        let mut playouts = 0;
        while playouts < cap && start.elapsed() < deadline {
            self.mcts.search(root);
            playouts += 1;
        }

        self.finish(root, playouts, start)
    }

    /// Run exactly `playouts` playouts from `root`, ignoring the clock, then
    /// return the best action.
    ///
    /// # Errors
    /// Returns `OxError::NoLegalActions` if `root` has no legal actions.
    pub fn choose_action_with_playouts(&mut self, root: &S, playouts: usize) -> Result<S::Action> {
        let start = Instant::now();
        self.prepare(root)?;

        for _ in 0..playouts {
            self.mcts.search(root);
        }

        self.finish(root, playouts, start)
    }

    fn prepare(&mut self, root: &S) -> Result<()> {
        if root.is_terminal() {
            return Err(OxError::NoLegalActions);
        }
        if self.mcts.config().reset_between_moves {
            self.mcts.reset();
        }
        Ok(())
    }

    fn finish(&mut self, root: &S, playouts: usize, start: Instant) -> Result<S::Action> {
        let action = self.mcts.best_action(root);

        let report = SearchReport {
            playouts,
            elapsed: start.elapsed(),
            tree_size: self.mcts.tree().len(),
        };
        debug!(
            playouts = report.playouts,
            elapsed_ms = report.elapsed.as_millis() as u64,
            tree_size = report.tree_size,
            action = ?action,
            "search finished"
        );
        self.last_search = Some(report);

        action
    }
}
