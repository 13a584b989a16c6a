//! Core error types for roadmap-core.
//!
//! Uses `thiserror` for structured, matchable error variants. Every variant
//! carries the path it relates to so that batch callers can report which
//! roadmap failed and keep going.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the roadmap-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A roadmap's graph document or roadmaps root directory is absent.
    #[error("source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// A graph document failed to parse or lacks a `nodes` list.
    #[error("malformed graph document {path}: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },

    /// An I/O failure while reading a document or scanning a directory.
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
