//! Monte Carlo Tree Search with UCT selection and transposition sharing.
//!
//! This crate provides a generic MCTS implementation that can be used with
//! any position implementing the `ox_core::GameState` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `GameState` implementation
//! - **Transpositions**: Statistics are keyed by position value, so every
//!   move order reaching a position shares one entry
//! - **UCT Selection**: Q/N + C * sqrt(ln(N_parent) / N) with C = sqrt(2)
//! - **Evaluator Abstraction**: Random rollouts by default
//! - **Time Budgets**: [`Agent`] searches until a wall-clock budget runs out
//!
//! # Example
//!
//! ```
//! use ox_mcts::{games::Board, Agent, MctsConfig, RolloutEvaluator};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use std::time::Duration;
//!
//! let board = Board::tic_tac_toe();
//!
//! let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(1));
//! let mut agent = Agent::new(MctsConfig::default(), evaluator, ChaCha8Rng::seed_from_u64(42))
//!     .expect("valid config");
//!
//! let action = agent.choose_action(&board, Duration::from_millis(50)).expect("legal move");
//! println!("Best action: {}", action);
//! println!("Playouts: {}", agent.last_search().unwrap().playouts);
//! ```

pub mod agent;
pub mod config;
pub mod evaluator;
pub mod games;
pub mod node;
pub mod search;
pub mod tree;

pub use agent::{Agent, SearchReport};
pub use config::MctsConfig;
pub use evaluator::{Evaluator, RolloutEvaluator};
pub use node::NodeStats;
pub use search::{ChildSummary, Mcts};
pub use tree::Tree;
