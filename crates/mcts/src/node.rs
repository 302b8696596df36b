//! Per-position statistics and the UCT scoring rule.

use serde::Serialize;

/// Statistics for a single position in the search.
///
/// `total_reward` is stored from the perspective of the player who moved
/// *into* this position, so a parent compares its children's averages
/// directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct NodeStats {
    /// Sum of rewards backed up through this position.
    pub total_reward: f64,

    /// Number of playouts that traversed this position.
    pub visits: u64,
}

impl NodeStats {
    /// Fold one playout result into the statistics.
    pub fn record(&mut self, reward: f64) {
        self.visits += 1;
        self.total_reward += reward;
    }

    /// Mean reward (Q/N), or `None` if the position was never visited.
    pub fn mean_reward(&self) -> Option<f64> {
        if self.visits == 0 {
            None
        } else {
            Some(self.total_reward / self.visits as f64)
        }
    }
}

/// UCT score of a child given its parent's visit count.
///
/// score = Q(c)/N(c) + C * sqrt(ln(N(parent)) / N(c))
///
/// An unvisited child scores `+inf` so it is always preferred; the result is
/// never NaN for a parent that has been visited at least once.
pub fn uct_score(child: &NodeStats, parent_visits: u64, exploration: f64) -> f64 {
    let Some(mean) = child.mean_reward() else {
        return f64::INFINITY;
    };
    let ln_parent = (parent_visits.max(1) as f64).ln();
    mean + exploration * (ln_parent / child.visits as f64).sqrt()
}

/// Exploitation-only score used when recommending a move.
///
/// Unvisited children score `-inf` and are only picked when nothing else
/// is available.
pub fn average_score(child: &NodeStats) -> f64 {
    child.mean_reward().unwrap_or(f64::NEG_INFINITY)
}
