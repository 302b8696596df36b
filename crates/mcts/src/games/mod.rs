//! Game implementations bundled with the search.
//!
//! These games are used to validate the search and to drive the
//! self-play tool.

pub mod tictactoe;

pub use tictactoe::{Board, Cell, Mark};
