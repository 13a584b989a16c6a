//! Batch entry points: materialize, validate, reconcile, and the full run.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use roadmap_check::reconcile::{reconcile_roadmap, ReconcileOutcome};
pub use roadmap_check::reconcile::DEFAULT_MAX_REPAIR_PASSES;
use roadmap_check::validate::{validate_roadmap, ValidationReport};
use roadmap_core::{discover_roadmaps, ContentFile, ContentIndex, Hierarchy, RoadmapGraph};
use roadmap_table::materialize::materialize;
use roadmap_table::store;
use roadmap_table::summary::{HierarchyStats, RoadmapSummary};
use roadmap_table::TableStore;

use crate::error::PipelineError;

/// Paths and bounds for one batch run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory holding one subdirectory per roadmap.
    pub roadmaps_dir: PathBuf,
    /// Directory the tables are written to.
    pub output_dir: PathBuf,
    /// Bound on repair passes per roadmap before declaring non-convergence.
    pub max_repair_passes: usize,
}

impl PipelineConfig {
    /// Builds a config with the default repair-pass bound.
    pub fn new(roadmaps_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        PipelineConfig {
            roadmaps_dir: roadmaps_dir.into(),
            output_dir: output_dir.into(),
            max_repair_passes: DEFAULT_MAX_REPAIR_PASSES,
        }
    }

    fn content_dir(&self, roadmap: &str) -> PathBuf {
        self.roadmaps_dir.join(roadmap).join("content")
    }
}

/// A graph document excluded from a run, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRoadmap {
    /// Roadmap name.
    pub roadmap: String,
    /// Document file name.
    pub file_name: String,
    /// Human-readable failure description.
    pub reason: String,
}

/// Numeric summary of one materialization run, sufficient to detect
/// partial failure without reading logs line by line.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Graph documents discovered.
    pub documents_found: usize,
    /// Documents materialized successfully.
    pub processed: usize,
    /// Documents skipped, with reasons.
    pub skipped: Vec<SkippedRoadmap>,
    /// Rows across all tables (the global table's length).
    pub total_nodes: usize,
    /// Edges that overwrote an earlier parent during resolution.
    pub parent_collisions: u32,
    /// Parent references pointing at identifiers absent from the node set.
    pub dangling_parents: u32,
    /// Convention-violating `.md` files across content directories.
    pub naming_violations: u32,
}

impl RunSummary {
    /// Number of skipped documents.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Materializes every discovered roadmap document into the output tables.
///
/// Per-roadmap order is Load -> Resolve -> Index -> Materialize; roadmaps
/// share no mutable state, and the global concatenation is written only
/// after every per-roadmap table (the single join barrier of the run).
pub fn materialize_all(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let tables = TableStore::new(&config.output_dir);
    tables.ensure_output_dir()?;
    let sources = discover_roadmaps(&config.roadmaps_dir)?;

    let mut summary = RunSummary {
        documents_found: sources.len(),
        ..RunSummary::default()
    };
    let mut global_rows = Vec::new();
    let mut roadmap_summaries: Vec<RoadmapSummary> = Vec::new();

    for source in &sources {
        info!(roadmap = %source.roadmap, file = %source.file_name, "materializing");
        let graph = match RoadmapGraph::load(&source.roadmap, &source.file_path) {
            Ok(graph) => graph,
            Err(e) => {
                warn!(roadmap = %source.roadmap, error = %e, "skipping document");
                summary.skipped.push(SkippedRoadmap {
                    roadmap: source.roadmap.clone(),
                    file_name: source.file_name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let hierarchy = Hierarchy::resolve(&graph.edges);
        let index = load_index(config, &source.roadmap);

        let materialized = materialize(&graph, &hierarchy, &index);
        tables.write_roadmap(&source.roadmap, &materialized.rows)?;

        summary.processed += 1;
        summary.total_nodes += materialized.rows.len();
        summary.parent_collisions += hierarchy.parent_collisions;
        summary.dangling_parents += materialized.dangling_parents;
        summary.naming_violations += index.naming_violations;
        global_rows.extend(materialized.rows);
        roadmap_summaries.push(materialized.summary);
    }

    tables.write_global(&global_rows)?;
    tables.write_summaries(&roadmap_summaries)?;
    info!(
        processed = summary.processed,
        skipped = summary.skipped_count(),
        total_nodes = summary.total_nodes,
        "materialization finished"
    );
    Ok(summary)
}

/// Validation results for a whole output directory.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateRunReport {
    /// The aggregate cross-check report.
    pub report: ValidationReport,
    /// Content files whose node id appears in no loaded graph document.
    pub orphaned_content: Vec<ContentFile>,
}

/// Cross-checks every persisted table against a fresh content scan.
pub fn validate_all(config: &PipelineConfig) -> Result<ValidateRunReport, PipelineError> {
    let tables = TableStore::new(&config.output_dir);
    let mut validations = Vec::new();
    let mut indexed_content: Vec<ContentFile> = Vec::new();

    for (roadmap, path) in tables.list_roadmap_tables()? {
        let rows = store::read_rows(&path)?;
        let index = load_index(config, &roadmap);
        indexed_content.extend(index.iter().cloned());
        validations.push(validate_roadmap(&rows, &index));
    }

    let orphaned_content = find_orphaned_content(config, indexed_content);
    Ok(ValidateRunReport {
        report: ValidationReport::new(validations),
        orphaned_content,
    })
}

/// Reconciliation results for a whole output directory.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileRunReport {
    /// Per-roadmap outcomes.
    pub outcomes: Vec<ReconcileOutcome>,
    /// Roadmaps whose tables did not converge within the pass bound.
    pub nonconvergent: usize,
}

/// Runs the validate/repair loop over every persisted table.
pub fn reconcile_all(config: &PipelineConfig) -> Result<ReconcileRunReport, PipelineError> {
    let tables = TableStore::new(&config.output_dir);
    let mut outcomes = Vec::new();
    let mut nonconvergent = 0;

    for (roadmap, path) in tables.list_roadmap_tables()? {
        let index = load_index(config, &roadmap);
        let outcome = reconcile_roadmap(&path, &index, &config.roadmaps_dir, config.max_repair_passes)?;
        if outcome.converged {
            info!(
                roadmap = %roadmap,
                passes = outcome.passes,
                "table reconciled"
            );
        } else {
            warn!(
                roadmap = %roadmap,
                passes = outcome.passes,
                "repair did not converge; keeping best-effort table"
            );
            nonconvergent += 1;
        }
        outcomes.push(outcome);
    }

    Ok(ReconcileRunReport {
        outcomes,
        nonconvergent,
    })
}

/// Report of a full batch run.
#[derive(Debug, Clone, Serialize)]
pub struct FullRunReport {
    /// Materialization summary.
    pub materialize: RunSummary,
    /// Reconciliation outcomes.
    pub reconcile: ReconcileRunReport,
    /// Final validation after reconciliation.
    pub validation: ValidateRunReport,
}

/// Materializes, reconciles, then re-validates to confirm convergence.
pub fn run(config: &PipelineConfig) -> Result<FullRunReport, PipelineError> {
    let materialize = materialize_all(config)?;
    let reconcile = reconcile_all(config)?;
    let validation = validate_all(config)?;
    Ok(FullRunReport {
        materialize,
        reconcile,
        validation,
    })
}

/// Computes hierarchy statistics from every persisted table.
pub fn hierarchy_stats_all(config: &PipelineConfig) -> Result<Vec<HierarchyStats>, PipelineError> {
    let tables = TableStore::new(&config.output_dir);
    let mut stats = Vec::new();
    for (roadmap, path) in tables.list_roadmap_tables()? {
        let rows = store::read_rows(&path)?;
        stats.push(HierarchyStats::from_rows(&roadmap, &rows));
    }
    Ok(stats)
}

/// Scans a roadmap's content directory, degrading to an empty index when
/// the scan itself fails. Content is a per-roadmap feature; its absence or
/// unreadability never fails the batch.
fn load_index(config: &PipelineConfig, roadmap: &str) -> ContentIndex {
    match ContentIndex::scan(roadmap, &config.content_dir(roadmap)) {
        Ok(index) => index,
        Err(e) => {
            warn!(roadmap = %roadmap, error = %e, "content scan failed; treating as empty");
            ContentIndex::empty(roadmap)
        }
    }
}

/// Content files bound to node ids that exist in no loaded graph document.
fn find_orphaned_content(config: &PipelineConfig, content: Vec<ContentFile>) -> Vec<ContentFile> {
    let mut known: HashSet<(String, String)> = HashSet::new();
    if let Ok(sources) = discover_roadmaps(&config.roadmaps_dir) {
        for source in sources {
            if let Ok(graph) = RoadmapGraph::load(&source.roadmap, &source.file_path) {
                for id in graph.nodes_by_id.keys() {
                    known.insert((source.roadmap.clone(), id.clone()));
                }
            }
        }
    }
    content
        .into_iter()
        .filter(|cf| !known.contains(&(cf.roadmap.clone(), cf.node_id.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_doc(root: &Path, roadmap: &str, body: &str) {
        let dir = root.join(roadmap);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{roadmap}.json")), body).unwrap();
    }

    fn write_content(root: &Path, roadmap: &str, name: &str) {
        let dir = root.join(roadmap).join("content");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), "# doc").unwrap();
    }

    fn config(tmp: &tempfile::TempDir) -> PipelineConfig {
        PipelineConfig::new(tmp.path().join("roadmaps"), tmp.path().join("out"))
    }

    #[test]
    fn malformed_document_is_isolated() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(&tmp);
        write_doc(&cfg.roadmaps_dir, "good", r#"{ "nodes": [ { "id": "a" } ] }"#);
        write_doc(&cfg.roadmaps_dir, "broken", "{ not json");

        let summary = materialize_all(&cfg).unwrap();
        assert_eq!(summary.documents_found, 2);
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped_count(), 1);
        assert_eq!(summary.skipped[0].roadmap, "broken");

        // The failing roadmap is excluded from the global table.
        let tables = TableStore::new(&cfg.output_dir);
        let global = store::read_rows(&tables.global_table_path()).unwrap();
        assert_eq!(global.len(), 1);
        assert_eq!(global[0].roadmap, "good");
    }

    #[test]
    fn missing_roadmaps_root_fails_the_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(&tmp);
        let err = materialize_all(&cfg).unwrap_err();
        assert!(matches!(err, PipelineError::Core(_)));
    }

    #[test]
    fn materialize_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(&tmp);
        write_doc(
            &cfg.roadmaps_dir,
            "demo",
            r#"{
                "nodes": [
                    { "id": "r1", "data": { "label": "Root" } },
                    { "id": "c1", "data": { "label": "Child" } }
                ],
                "edges": [ { "source": "r1", "target": "c1" } ]
            }"#,
        );
        write_content(&cfg.roadmaps_dir, "demo", "Child@c1.md");

        materialize_all(&cfg).unwrap();
        let tables = TableStore::new(&cfg.output_dir);
        let first = fs::read(tables.roadmap_table_path("demo")).unwrap();
        let first_global = fs::read(tables.global_table_path()).unwrap();

        materialize_all(&cfg).unwrap();
        assert_eq!(fs::read(tables.roadmap_table_path("demo")).unwrap(), first);
        assert_eq!(fs::read(tables.global_table_path()).unwrap(), first_global);
    }

    #[test]
    fn orphaned_content_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(&tmp);
        write_doc(&cfg.roadmaps_dir, "demo", r#"{ "nodes": [ { "id": "a" } ] }"#);
        write_content(&cfg.roadmaps_dir, "demo", "Known@a.md");
        write_content(&cfg.roadmaps_dir, "demo", "Ghost@zz.md");

        materialize_all(&cfg).unwrap();
        let validation = validate_all(&cfg).unwrap();
        assert_eq!(validation.orphaned_content.len(), 1);
        assert_eq!(validation.orphaned_content[0].node_id, "zz");
    }

    #[test]
    fn stats_reflect_persisted_tables() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(&tmp);
        write_doc(
            &cfg.roadmaps_dir,
            "demo",
            r#"{
                "nodes": [ { "id": "r1" }, { "id": "c1" }, { "id": "c2" } ],
                "edges": [
                    { "source": "r1", "target": "c1" },
                    { "source": "r1", "target": "c2" }
                ]
            }"#,
        );
        materialize_all(&cfg).unwrap();
        let stats = hierarchy_stats_all(&cfg).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].root_nodes, 1);
        assert_eq!(stats[0].child_nodes, 2);
        assert!((stats[0].hierarchy_ratio() - 66.666).abs() < 0.01);
    }
}
