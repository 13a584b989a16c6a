//! Table materialization and persistence for roadmap graphs.
//!
//! Joins the loader, hierarchy, and content index outputs into one
//! [`roadmap_core::DerivedRow`] per node, and persists per-roadmap node
//! tables plus a global concatenation and a roadmaps summary as CSV.
//!
//! # Modules
//!
//! - [`error`]: TableError enum with all failure modes
//! - [`materialize`]: the node-to-row join
//! - [`store`]: CSV reading/writing and table naming conventions
//! - [`summary`]: per-roadmap summary and hierarchy statistics

pub mod error;
pub mod materialize;
pub mod store;
pub mod summary;

// Re-export commonly used types
pub use error::TableError;
pub use materialize::{materialize, MaterializedRoadmap};
pub use store::TableStore;
pub use summary::{HierarchyStats, RoadmapSummary};
