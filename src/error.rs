use thiserror::Error;

/// Errors produced by board and directory operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A mutation was attempted while the board is in view-only mode.
    #[error("the board is in view-only mode")]
    ViewOnly,

    /// A site index outside the registry was addressed.
    #[error("unknown site index {0}")]
    UnknownSite(usize),

    /// A break index other than 0 or 1 was requested.
    #[error("break index must be 0 or 1, got {0}")]
    InvalidBreakIndex(usize),

    /// CSV encoding failed.
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for board operations.
pub type Result<T> = std::result::Result<T, Error>;
