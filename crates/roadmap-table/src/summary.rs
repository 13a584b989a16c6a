//! Per-roadmap aggregates derived from materialization.
//!
//! [`RoadmapSummary`] is computed in the same pass as the rows (no second
//! full scan) and persisted alongside the node tables. [`HierarchyStats`]
//! is derivable from any row slice and backs the hierarchy ratio reported
//! per roadmap.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use roadmap_core::DerivedRow;

/// One row of the roadmaps summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapSummary {
    /// Roadmap name.
    pub roadmap: String,
    /// Source document file name.
    pub file_name: String,
    /// Total derived rows (pre-deduplication).
    pub total_nodes: usize,
    /// Number of distinct non-empty type tags.
    pub node_types: usize,
}

/// Root/child breakdown of one roadmap's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyStats {
    /// Roadmap name.
    pub roadmap: String,
    /// Total rows.
    pub total_nodes: usize,
    /// Rows with no resolved parent.
    pub root_nodes: usize,
    /// Rows with a resolved parent.
    pub child_nodes: usize,
    /// Distinct non-empty type tags.
    pub node_types: usize,
}

impl HierarchyStats {
    /// Computes the breakdown from a roadmap's rows.
    pub fn from_rows(roadmap: &str, rows: &[DerivedRow]) -> Self {
        let root_nodes = rows.iter().filter(|r| r.is_root()).count();
        let node_types: HashSet<&str> = rows
            .iter()
            .map(|r| r.node_type.as_str())
            .filter(|t| !t.is_empty())
            .collect();
        HierarchyStats {
            roadmap: roadmap.to_string(),
            total_nodes: rows.len(),
            root_nodes,
            child_nodes: rows.len() - root_nodes,
            node_types: node_types.len(),
        }
    }

    /// Percentage of rows that have a parent; 0 for an empty table.
    pub fn hierarchy_ratio(&self) -> f64 {
        if self.total_nodes == 0 {
            0.0
        } else {
            self.child_nodes as f64 / self.total_nodes as f64 * 100.0
        }
    }
}
