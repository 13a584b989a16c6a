//! Consistency validation and repair for materialized node tables.
//!
//! The persisted tables, the content files on disk, and the graph documents
//! are three loosely-coupled representations of the same roadmaps. This
//! crate cross-checks them ([`validate`]), rewrites tables back into
//! agreement ([`repair`]), and drives the two to a fixed point with a
//! bounded loop ([`reconcile`]).
//!
//! # Modules
//!
//! - [`error`]: CheckError enum
//! - [`validate`]: read-only classification of every (roadmap, node) pair
//! - [`repair`]: idempotent in-place table repair
//! - [`reconcile`]: validate/repair loop with a pass bound

pub mod error;
pub mod reconcile;
pub mod repair;
pub mod validate;

// Re-export commonly used types
pub use error::CheckError;
pub use reconcile::{reconcile_roadmap, ReconcileOutcome, DEFAULT_MAX_REPAIR_PASSES};
pub use repair::{expected_reference_path, repair_rows, RepairSummary};
pub use validate::{
    validate_roadmap, Finding, ReferenceStatus, RoadmapCoverage, RoadmapValidation,
    ValidationReport,
};
