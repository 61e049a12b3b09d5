//! Error kinds surfaced by the match engine and its stores

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player name must not be empty")]
    EmptyPlayerName,

    #[error("target score must be positive (got {0})")]
    InvalidTargetScore(u32),

    #[error("unknown choice: {0:?}")]
    InvalidChoice(String),

    #[error("unknown difficulty: {0:?}")]
    InvalidDifficulty(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("inconsistent match snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("match is already finished")]
    MatchFinished,

    #[error("no match in progress")]
    NoActiveMatch,

    #[error("match is still in progress")]
    MatchNotFinished,

    #[error("storage error: {0}")]
    Storage(String),
}

impl GameError {
    /// Input was rejected before any state was touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GameError::EmptyPlayerName
                | GameError::InvalidTargetScore(_)
                | GameError::InvalidChoice(_)
                | GameError::InvalidDifficulty(_)
                | GameError::InvalidConfig(_)
                | GameError::InvalidSnapshot(_)
        )
    }

    /// The operation is not allowed in the current phase.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            GameError::MatchFinished | GameError::NoActiveMatch | GameError::MatchNotFinished
        )
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Storage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
