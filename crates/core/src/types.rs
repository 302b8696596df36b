//! Reward vectors reported by finished games.

use std::fmt;

/// Terminal reward per player, indexed by player number.
///
/// For the two-player zero-sum games in this workspace the entries are
/// `+1.0` for the winner, `-1.0` for the loser and `0.0` each for a draw.
///
/// # Example
/// ```
/// use ox_core::Rewards;
///
/// let rewards = Rewards::win(1, 2);
/// assert_eq!(rewards.get(1), 1.0);
/// assert_eq!(rewards.get(0), -1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Rewards(Vec<f64>);

impl Rewards {
    /// Reward for a win.
    pub const WIN: f64 = 1.0;

    /// Reward for a loss.
    pub const LOSS: f64 = -1.0;

    /// Reward for a draw.
    pub const DRAW: f64 = 0.0;

    /// Create a reward vector from raw per-player values.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// All players receive zero (draws, unfinished games).
    pub fn zeros(num_players: usize) -> Self {
        Self(vec![Self::DRAW; num_players])
    }

    /// `winner` receives `WIN`, everyone else `LOSS`.
    pub fn win(winner: usize, num_players: usize) -> Self {
        let values = (0..num_players)
            .map(|p| if p == winner { Self::WIN } else { Self::LOSS })
            .collect();
        Self(values)
    }

    /// Reward for `player`, or `0.0` if the player is unknown.
    pub fn get(&self, player: usize) -> f64 {
        self.0.get(player).copied().unwrap_or(Self::DRAW)
    }

    /// Number of players covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over all players (zero for zero-sum outcomes).
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Index of the player with the strictly highest reward, if any.
    pub fn winner(&self) -> Option<usize> {
        let best = self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut leaders = self.0.iter().enumerate().filter(|(_, r)| **r == best);
        match (leaders.next(), leaders.next()) {
            (Some((player, _)), None) => Some(player),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl fmt::Display for Rewards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, r) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:+.1}", r)?;
        }
        write!(f, "]")
    }
}
