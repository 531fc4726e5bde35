/// Rejections from dropping a disc into a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of range (board has {cols} columns)")]
    ColumnOutOfRange { column: usize, cols: usize },
}

/// Errors that can occur when building a game configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors returned by [`crate::session::GameSession`] commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("game is already over")]
    GameOver,

    #[error("it is not the player's turn")]
    NotPlayersTurn,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("AI has no legal column")]
    NoLegalMove,

    #[error("illegal move: {0}")]
    Move(#[from] MoveError),
}

/// Errors that can occur while encoding persisted state.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
