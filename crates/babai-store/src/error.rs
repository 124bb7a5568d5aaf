//! Error types for the data layer.

use std::path::PathBuf;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the save file failed.
    #[error("save file I/O error at {path}: {source}")]
    Io {
        /// The save file path involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The save blob could not be serialized or deserialized.
    #[error("save serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
