//! MCTS configuration parameters.
//!
//! These parameters control the behavior of the UCT search and of the
//! time-budgeted agent that drives it.

use ox_core::{OxError, Result};
use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// UCT exploration constant `C`.
    /// Part of the formula: Q/N + C * sqrt(ln(N_parent) / N)
    pub exploration: f64,

    /// Fraction of the caller's time budget actually spent searching.
    /// The remainder is left for move application and I/O.
    pub budget_fraction: f64,

    /// Optional cap on playouts per decision, applied on top of the clock.
    pub max_playouts: Option<usize>,

    /// Drop all tree statistics before every decision.
    /// Off by default so transposition knowledge carries over between moves.
    pub reset_between_moves: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: std::f64::consts::SQRT_2,
            budget_fraction: 0.9,
            max_playouts: None,
            reset_between_moves: false,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified exploration constant.
    pub fn with_exploration(exploration: f64) -> Self {
        Self {
            exploration,
            ..Default::default()
        }
    }

    /// Create a config that stops after at most `max_playouts` per decision.
    pub fn with_max_playouts(max_playouts: usize) -> Self {
        Self {
            max_playouts: Some(max_playouts),
            ..Default::default()
        }
    }

    /// Check that every parameter is usable.
    ///
    /// # Errors
    /// Returns `OxError::InvalidConfig` if:
    /// - exploration is negative or not finite
    /// - budget_fraction is outside (0, 1]
    /// - max_playouts is `Some(0)`
    pub fn validate(&self) -> Result<()> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(OxError::InvalidConfig(format!(
                "exploration {} must be a finite, non-negative number",
                self.exploration
            )));
        }

        if !(self.budget_fraction > 0.0 && self.budget_fraction <= 1.0) {
            return Err(OxError::InvalidConfig(format!(
                "budget_fraction {} is outside (0, 1]",
                self.budget_fraction
            )));
        }

        if self.max_playouts == Some(0) {
            return Err(OxError::InvalidConfig(
                "max_playouts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
