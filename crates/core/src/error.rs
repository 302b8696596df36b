use thiserror::Error;

/// Errors that can occur while playing or searching a game
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OxError {
    #[error("No legal actions available")]
    NoLegalActions,

    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Invalid search config: {0}")]
    InvalidConfig(String),
}

/// Convenience Result type for ox operations
pub type Result<T> = std::result::Result<T, OxError>;
