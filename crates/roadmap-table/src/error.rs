//! Error types for the table layer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by table persistence and materialization.
#[derive(Debug, Error)]
pub enum TableError {
    /// CSV serialization or deserialization failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O failure on a table file or output directory.
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table file expected on disk was not found.
    #[error("table not found: {path}")]
    TableNotFound { path: PathBuf },
}
