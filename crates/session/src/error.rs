use crate::core::BoardError;

/// Errors that can occur when validating a [`SessionConfig`](crate::SessionConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board must be at least 1x1 (got {width}x{height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("tile kinds must be between {min} and {max} (got {got})")]
    TileKinds { got: usize, min: usize, max: usize },

    #[error("max_moves must be > 0")]
    NoMoves,

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Errors that can occur when creating or resuming a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("board error: {0}")]
    Board(#[from] BoardError),

    #[error("game {0} has no saved board")]
    NoSavedBoard(u64),

    #[error("game {0} has a saved tile bag with no tile kinds")]
    EmptyBag(u64),
}

/// Errors returned by a [`GameStore`](crate::GameStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("game {0} not found")]
    NotFound(u64),
}
