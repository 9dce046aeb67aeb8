use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("registry I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("registry encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not determine an application data directory")]
    NoDataDir,
}
