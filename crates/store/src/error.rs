use std::path::PathBuf;

/// Failures of the durable medium. The in-memory store itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Durable record not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed durable record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("No durable record has been written yet")]
    Empty,
}

pub type StoreResult<T> = Result<T, StoreError>;
