use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("report not found: {0}")]
    NotFound(String),

    #[error("report already finalized: {0}")]
    AlreadyFinalized(String),

    #[error("duplicate vote: {0}")]
    DuplicateVote(String),

    #[error("invalid vote type: {0}")]
    InvalidVote(String),

    #[error("classification oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("transient failure: {0}")]
    TransientFailure(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
