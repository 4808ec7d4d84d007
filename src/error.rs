use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid team configuration: {0}")]
    TeamConfig(String),

    #[error("Match {0} has already been stored")]
    DuplicateMatch(String),

    #[error("Match not found: {0}")]
    MatchNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
