use thiserror::Error;

pub use facts::ValidationError;

/// Failures talking to the hosted table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("table returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("bad row payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("table returned no rows")]
    EmptyReturn,
}

/// Everything a session operation can surface. Validation never reaches
/// the table; table failures never touch local state.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
