//! Error types for the batch pipeline.
//!
//! Only failures of the batch itself surface here (a missing roadmaps root,
//! an unwritable output directory). Per-roadmap failures are absorbed into
//! the run summary instead of propagating.

use thiserror::Error;

use roadmap_check::CheckError;
use roadmap_core::CoreError;
use roadmap_table::TableError;

/// Errors that abort a whole batch run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Roadmap discovery or content scanning failed at the batch level.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Table persistence failed at the batch level.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Validation or repair failed at the batch level.
    #[error(transparent)]
    Check(#[from] CheckError),
}
