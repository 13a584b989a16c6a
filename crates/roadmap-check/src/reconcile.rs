//! The validate/repair loop for one roadmap's table.
//!
//! Per-roadmap state machine: Materialized -> Validated -> {Clean |
//! NeedsRepair} -> Repaired -> Validated, looping until validation finds
//! nothing repairable or the pass bound is hit. Hitting the bound is
//! reported, never silently retried; the best-effort table stays on disk.

use std::path::Path;

use serde::Serialize;

use roadmap_core::ContentIndex;
use roadmap_table::store;

use crate::error::CheckError;
use crate::repair::{repair_rows, RepairSummary};
use crate::validate::{validate_roadmap, RoadmapValidation};

/// Default bound on repair passes before declaring non-convergence.
pub const DEFAULT_MAX_REPAIR_PASSES: usize = 3;

/// Result of reconciling one roadmap's table.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileOutcome {
    /// Roadmap name.
    pub roadmap: String,
    /// `true` when the final validation found nothing repairable.
    pub converged: bool,
    /// Repair passes applied (0 when already clean).
    pub passes: usize,
    /// Accumulated change counts across all passes.
    pub repairs: RepairSummary,
    /// The validation after the last pass.
    pub final_validation: RoadmapValidation,
}

/// Reconciles one roadmap's persisted table with its content directory.
///
/// Reads the table once, alternates validation and repair up to
/// `max_passes` times, and writes the table back after each changing pass.
/// The index is scanned once per call -- validator and repairer observe the
/// same filesystem snapshot within a run.
pub fn reconcile_roadmap(
    table_path: &Path,
    index: &ContentIndex,
    roadmaps_root: &Path,
    max_passes: usize,
) -> Result<ReconcileOutcome, CheckError> {
    let mut rows = store::read_rows(table_path)?;
    let mut repairs = RepairSummary::default();
    let mut passes = 0;

    loop {
        let validation = validate_roadmap(&rows, index);
        if !validation.needs_repair() {
            return Ok(ReconcileOutcome {
                roadmap: index.roadmap.clone(),
                converged: true,
                passes,
                repairs,
                final_validation: validation,
            });
        }
        if passes >= max_passes {
            return Ok(ReconcileOutcome {
                roadmap: index.roadmap.clone(),
                converged: false,
                passes,
                repairs,
                final_validation: validation,
            });
        }

        let pass = repair_rows(&mut rows, index, roadmaps_root);
        repairs.absorb(&pass);
        passes += 1;
        if pass.changed() {
            store::write_rows(table_path, &rows)?;
        }
    }
}
