//! Batch orchestration over all roadmaps.
//!
//! Drives the per-roadmap extraction pipeline (load, resolve, index,
//! materialize) across every discovered graph document, then validation and
//! reconciliation across every persisted table. A failure on one roadmap is
//! caught at the roadmap boundary, logged, counted, and never aborts the
//! batch; the global concatenation simply excludes the failed roadmap.
//!
//! # Modules
//!
//! - [`error`]: PipelineError enum
//! - [`run`]: the batch entry points and run reports

pub mod error;
pub mod run;

// Re-export commonly used types
pub use error::PipelineError;
pub use run::{
    hierarchy_stats_all, materialize_all, reconcile_all, run, validate_all, FullRunReport,
    PipelineConfig, ReconcileRunReport, RunSummary, SkippedRoadmap, ValidateRunReport,
};
