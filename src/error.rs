//! Error types shared by the league rule modules.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LeagueError {
    /// The caller handed over a record that breaks the input contract
    /// (position 0, negative fee, duplicate rank, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown ladder: {0}")]
    UnknownLadder(String),
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
    #[error("config error: {0}")]
    Config(String),
}

pub type LeagueResult<T> = Result<T, LeagueError>;

impl LeagueError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
