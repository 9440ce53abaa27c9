use std::path::PathBuf;

use promptver_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is {size} bytes, above the {limit}-byte input limit", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Invalid version snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
