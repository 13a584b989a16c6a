//! Error types for validation and repair.

use thiserror::Error;

use roadmap_core::CoreError;
use roadmap_table::TableError;

/// Errors produced by validation, repair, and the reconcile loop.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Reading or writing a node table failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Rebuilding a content index failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}
