use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the store file failed.
    #[error("Failed to access store file {path}: {source}")]
    Io {
        /// Path of the store file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but does not hold a valid store document.
    #[error("Store file {path} is not valid JSON: {source}")]
    Corrupt {
        /// Path of the store file
        path: PathBuf,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the in-memory store for persistence failed.
    #[error("Failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
}
