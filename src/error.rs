use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = EngineError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A synchronization was requested before any dataset was loaded
    #[error("no dataset loaded")]
    NoDataset,

    #[error("invalid dataset record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feature store rejected edits: {0}")]
    Store(String),

    /// A newer selection arrived while this pass was running; nothing was written
    #[error("synchronization generation {generation} superseded by {latest}")]
    Superseded { generation: u64, latest: u64 },
}
