//! Read-only cross-check of node tables against the content universe.
//!
//! The validator holds no persisted state. Every invocation works from the
//! persisted rows, a fresh content index, and existence checks against the
//! live filesystem, and classifies every (roadmap, node id) pair appearing
//! in either universe into exactly one [`ReferenceStatus`]. The broken-path
//! signal (a referenced path that does not resolve on disk) is an
//! orthogonal axis carried on the finding, not a fifth category.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use roadmap_core::{ContentFile, ContentIndex, DerivedRow};

/// Primary classification of a (roadmap, node id) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceStatus {
    /// Content exists and a row references it with the matching path.
    Correct,
    /// Content exists but no row references it.
    UnreferencedContent,
    /// A row references a path but no content file claims this node.
    DanglingReference,
    /// Content exists and a row references it, but with a different path.
    StaleReference,
}

/// One classified (roadmap, node id) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Roadmap the pair belongs to.
    pub roadmap: String,
    /// Node identifier.
    pub node_id: String,
    /// Primary classification.
    pub status: ReferenceStatus,
    /// The referenced path from the table, when any row references one.
    pub row_path: Option<String>,
    /// The path the content index claims for this node, when content exists.
    pub expected_path: Option<String>,
    /// A row with this identifier exists in the table (whatever its path).
    pub row_present: bool,
    /// The referenced path does not resolve to a file on disk.
    pub missing_on_disk: bool,
}

/// Content-file count vs. reference count for one roadmap.
///
/// Ratios above 100% are expected and legitimate -- several rows may point
/// at the same content asset -- and are never flagged as defects here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapCoverage {
    /// Roadmap name.
    pub roadmap: String,
    /// Content files indexed on disk.
    pub content_files: usize,
    /// Table rows carrying a non-empty reference.
    pub references: usize,
}

impl RoadmapCoverage {
    /// References as a percentage of content files; 0 with no content.
    pub fn coverage_ratio(&self) -> f64 {
        if self.content_files == 0 {
            0.0
        } else {
            self.references as f64 / self.content_files as f64 * 100.0
        }
    }
}

/// Validation result for one roadmap's table.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapValidation {
    /// Roadmap name.
    pub roadmap: String,
    /// Classified pairs, index entries first, then reference-only pairs in
    /// row order.
    pub findings: Vec<Finding>,
    /// Content vs. reference counts.
    pub coverage: RoadmapCoverage,
    /// Extra rows sharing an identifier with an earlier row.
    pub duplicate_row_ids: usize,
    /// Content files claiming a node id already claimed by another file.
    pub duplicate_claims: Vec<ContentFile>,
    /// Convention-violating `.md` files excluded from the index.
    pub naming_violations: u32,
}

impl RoadmapValidation {
    /// Count of findings with the given status.
    pub fn count(&self, status: ReferenceStatus) -> usize {
        self.findings.iter().filter(|f| f.status == status).count()
    }

    /// Count of findings whose referenced path is missing on disk.
    pub fn broken_paths(&self) -> usize {
        self.findings.iter().filter(|f| f.missing_on_disk).count()
    }

    /// Returns `true` when a repair pass would change this table:
    /// duplicate rows to drop, stale or dangling references to rewrite, or
    /// unreferenced content with a row present to fill.
    pub fn needs_repair(&self) -> bool {
        if self.duplicate_row_ids > 0 {
            return true;
        }
        self.findings.iter().any(|f| match f.status {
            ReferenceStatus::Correct => false,
            ReferenceStatus::StaleReference | ReferenceStatus::DanglingReference => true,
            ReferenceStatus::UnreferencedContent => f.row_present,
        })
    }

    /// Returns `true` when every pair is correctly referenced and no
    /// duplicate rows remain.
    pub fn is_clean(&self) -> bool {
        self.duplicate_row_ids == 0
            && self
                .findings
                .iter()
                .all(|f| f.status == ReferenceStatus::Correct)
    }
}

/// Aggregate validation report across roadmaps.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Per-roadmap results.
    pub roadmaps: Vec<RoadmapValidation>,
    /// Total content files across roadmaps.
    pub total_content_files: usize,
    /// Total non-empty references across roadmaps.
    pub total_references: usize,
    /// Pairs classified correct.
    pub correct: usize,
    /// Content files with no referencing row.
    pub unreferenced_content: usize,
    /// References with no backing content file.
    pub dangling_references: usize,
    /// References with a mismatched path.
    pub stale_references: usize,
    /// References whose path is missing on disk.
    pub broken_paths: usize,
    /// Duplicate content-file claims across roadmaps.
    pub duplicate_claims: usize,
    /// Convention-violating files across roadmaps.
    pub naming_violations: u32,
}

impl ValidationReport {
    /// Builds the aggregate from per-roadmap results.
    pub fn new(roadmaps: Vec<RoadmapValidation>) -> Self {
        let mut report = ValidationReport {
            roadmaps: Vec::new(),
            total_content_files: 0,
            total_references: 0,
            correct: 0,
            unreferenced_content: 0,
            dangling_references: 0,
            stale_references: 0,
            broken_paths: 0,
            duplicate_claims: 0,
            naming_violations: 0,
        };
        for v in &roadmaps {
            report.total_content_files += v.coverage.content_files;
            report.total_references += v.coverage.references;
            report.correct += v.count(ReferenceStatus::Correct);
            report.unreferenced_content += v.count(ReferenceStatus::UnreferencedContent);
            report.dangling_references += v.count(ReferenceStatus::DanglingReference);
            report.stale_references += v.count(ReferenceStatus::StaleReference);
            report.broken_paths += v.broken_paths();
            report.duplicate_claims += v.duplicate_claims.len();
            report.naming_violations += v.naming_violations;
        }
        report.roadmaps = roadmaps;
        report
    }

    /// Returns `true` when every roadmap validated clean.
    pub fn is_clean(&self) -> bool {
        self.roadmaps.iter().all(RoadmapValidation::is_clean)
    }
}

/// Validates one roadmap's rows against its freshly scanned content index.
pub fn validate_roadmap(rows: &[DerivedRow], index: &ContentIndex) -> RoadmapValidation {
    // First non-empty referenced path per node id, in row order, plus the
    // total reference count (rows, not distinct ids -- aggregated rows
    // pointing at one asset are each a reference).
    let mut referenced: IndexMap<&str, &str> = IndexMap::new();
    let mut references = 0;
    let mut seen_ids = std::collections::HashSet::new();
    let mut duplicate_row_ids = 0;
    for row in rows {
        if !seen_ids.insert(row.id.as_str()) {
            duplicate_row_ids += 1;
        }
        if let Some(path) = row.content_file_path.as_deref() {
            if !path.is_empty() {
                references += 1;
                referenced.entry(&row.id).or_insert(path);
            }
        }
    }

    let mut findings = Vec::new();

    // Pairs with content on disk.
    for cf in index.iter() {
        let expected = cf.path.to_string_lossy().into_owned();
        let finding = match referenced.get(cf.node_id.as_str()) {
            Some(&row_path) if row_path == expected => Finding {
                roadmap: index.roadmap.clone(),
                node_id: cf.node_id.clone(),
                status: ReferenceStatus::Correct,
                row_path: Some(row_path.to_string()),
                expected_path: Some(expected),
                row_present: true,
                missing_on_disk: !Path::new(row_path).is_file(),
            },
            Some(&row_path) => Finding {
                roadmap: index.roadmap.clone(),
                node_id: cf.node_id.clone(),
                status: ReferenceStatus::StaleReference,
                row_path: Some(row_path.to_string()),
                expected_path: Some(expected),
                row_present: true,
                missing_on_disk: !Path::new(row_path).is_file(),
            },
            None => Finding {
                roadmap: index.roadmap.clone(),
                node_id: cf.node_id.clone(),
                status: ReferenceStatus::UnreferencedContent,
                row_path: None,
                expected_path: Some(expected),
                row_present: seen_ids.contains(cf.node_id.as_str()),
                missing_on_disk: false,
            },
        };
        findings.push(finding);
    }

    // Pairs referenced by the table with no content on disk.
    for (node_id, row_path) in &referenced {
        if index.get(node_id).is_some() {
            continue;
        }
        findings.push(Finding {
            roadmap: index.roadmap.clone(),
            node_id: node_id.to_string(),
            status: ReferenceStatus::DanglingReference,
            row_path: Some(row_path.to_string()),
            expected_path: None,
            row_present: true,
            missing_on_disk: !Path::new(row_path).is_file(),
        });
    }

    RoadmapValidation {
        roadmap: index.roadmap.clone(),
        findings,
        coverage: RoadmapCoverage {
            roadmap: index.roadmap.clone(),
            content_files: index.len(),
            references,
        },
        duplicate_row_ids,
        duplicate_claims: index.duplicate_claims.clone(),
        naming_violations: index.naming_violations,
    }
}
