//! Evaluation abstraction for MCTS.
//!
//! The `Evaluator` trait is the simulation phase of a playout: given the
//! frontier position it returns a reward estimate. `RolloutEvaluator` plays
//! uniformly random moves to the end of the game.

use ox_core::GameState;
use rand::seq::SliceRandom;
use rand::Rng;

/// Trait for evaluating positions.
pub trait Evaluator<S: GameState> {
    /// Estimate the reward of `state` for the player to move in `state`.
    ///
    /// For the terminal-reward games used here the value lies in [-1, 1].
    fn evaluate(&mut self, state: &S) -> f64;
}

/// Evaluator using uniformly random playouts to a terminal position.
#[derive(Clone, Debug)]
pub struct RolloutEvaluator<R: Rng> {
    rng: R,
}

impl<R: Rng> RolloutEvaluator<R> {
    /// Create a new rollout evaluator driven by `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Play random moves on a clone of `state` until the game ends and
    /// return the final position.
    ///
    /// A non-terminal position without legal actions also ends the rollout.
    pub fn rollout<S: GameState>(&mut self, state: &S) -> S {
        let mut current = state.clone();

        while !current.is_terminal() {
            let actions = current.legal_actions();
            let Some(action) = actions.choose(&mut self.rng) else {
                break;
            };
            current.apply(action);
        }

        current
    }
}

impl<S: GameState, R: Rng> Evaluator<S> for RolloutEvaluator<R> {
    fn evaluate(&mut self, state: &S) -> f64 {
        // Attribute the terminal reward to whoever moves at the frontier,
        // not to whoever happens to move at the end of the rollout.
        let player = state.current_player();
        self.rollout(state).rewards().get(player)
    }
}
