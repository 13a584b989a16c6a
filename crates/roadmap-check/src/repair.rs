//! Idempotent in-place repair of one roadmap's node table.
//!
//! Three steps, in order: drop duplicate rows by node identifier (first
//! occurrence kept), canonicalize every surviving reference to the path the
//! content index expects, and clear references with no backing content.
//! Running the repairer twice in succession is a no-op on the second run.
//! It never invents rows and never touches the parent columns.

use std::path::Path;

use serde::Serialize;

use roadmap_core::{ContentIndex, DerivedRow};

/// Counts of changes applied by one repair pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairSummary {
    /// Rows dropped because an earlier row had the same identifier.
    pub duplicates_removed: usize,
    /// Empty references filled in for nodes with content on disk.
    pub missing_added: usize,
    /// Mismatched references rewritten to the expected path.
    pub stale_corrected: usize,
    /// Non-empty references cleared because no content claims the node.
    pub orphans_cleared: usize,
}

impl RepairSummary {
    /// Returns `true` when the pass changed the table.
    pub fn changed(&self) -> bool {
        self.duplicates_removed > 0
            || self.missing_added > 0
            || self.stale_corrected > 0
            || self.orphans_cleared > 0
    }

    /// Accumulates another pass's counts into this one.
    pub fn absorb(&mut self, other: &RepairSummary) {
        self.duplicates_removed += other.duplicates_removed;
        self.missing_added += other.missing_added;
        self.stale_corrected += other.stale_corrected;
        self.orphans_cleared += other.orphans_cleared;
    }
}

/// The canonical reference path for a content file:
/// `<roadmaps_root>/<roadmap>/content/<file_name>`.
///
/// This is the same template the materializer's index paths follow, so a
/// freshly materialized table already carries canonical references.
pub fn expected_reference_path(roadmaps_root: &Path, roadmap: &str, file_name: &str) -> String {
    roadmaps_root
        .join(roadmap)
        .join("content")
        .join(file_name)
        .to_string_lossy()
        .into_owned()
}

/// Applies one repair pass to a roadmap's rows in place.
pub fn repair_rows(
    rows: &mut Vec<DerivedRow>,
    index: &ContentIndex,
    roadmaps_root: &Path,
) -> RepairSummary {
    let mut summary = RepairSummary::default();

    // Deduplicate by node identifier, keeping the first occurrence.
    let before = rows.len();
    let mut seen = std::collections::HashSet::new();
    rows.retain(|row| seen.insert(row.id.clone()));
    summary.duplicates_removed = before - rows.len();

    for row in rows.iter_mut() {
        match index.get(&row.id) {
            Some(cf) => {
                let expected =
                    expected_reference_path(roadmaps_root, &index.roadmap, &cf.file_name);
                match row.content_file_path.as_deref() {
                    None | Some("") => {
                        row.content_file_path = Some(expected);
                        summary.missing_added += 1;
                    }
                    Some(current) if current != expected => {
                        row.content_file_path = Some(expected);
                        summary.stale_corrected += 1;
                    }
                    Some(_) => {}
                }
            }
            None => {
                if row.has_content_reference() {
                    row.content_file_path = None;
                    summary.orphans_cleared += 1;
                }
            }
        }
    }

    summary
}
