//! Ox Core - Game abstractions shared by the search and the games
//!
//! This crate provides the `GameState` trait that any turn-based game must
//! implement to be searched by `ox_mcts`.
//!
//! # Types
//!
//! - [`GameState`] - Trait for game positions
//! - [`Rewards`] - Per-player terminal rewards
//! - [`OxError`] - Errors shared across the workspace

mod error;
mod game;
mod types;

pub use error::{OxError, Result};
pub use game::GameState;
pub use types::Rewards;
