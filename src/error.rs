use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("malformed strategy row: {0}")]
    MalformedStrategyRow(String),

    #[error("hash out of range: {0} (expected 0..528)")]
    HashOutOfRange(u16),

    #[error("strategy file not found: {0}")]
    StrategyFileNotFound(String),

    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type SolverResult<T> = Result<T, SolverError>;
