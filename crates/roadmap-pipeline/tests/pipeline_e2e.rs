//! End-to-end tests for the full batch pipeline.
//!
//! Each test lays out a roadmaps tree in a temp directory (graph documents
//! plus content files), runs the pipeline, and checks the persisted tables
//! and reports. Covers the demo roadmap scenario, drift repair after
//! content deletion, and cross-roadmap isolation of same-named content.

use std::fs;
use std::path::Path;

use roadmap_pipeline::{materialize_all, reconcile_all, run, validate_all, PipelineConfig};
use roadmap_table::store;
use roadmap_table::TableStore;

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

const DEMO_DOC: &str = r#"{
    "nodes": [
        { "id": "r1", "type": "title", "data": { "label": "Demo" } },
        { "id": "c1", "type": "topic", "data": { "label": "Basics" } },
        { "id": "c2", "type": "topic", "data": { "label": "Advanced" } }
    ],
    "edges": [
        { "source": "r1", "target": "c1" },
        { "source": "r1", "target": "c2" }
    ]
}"#;

#[test]
fn demo_roadmap_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = PipelineConfig::new(tmp.path().join("roadmaps"), tmp.path().join("out"));
    write_doc(&cfg.roadmaps_dir, "demo", DEMO_DOC);
    write_content(&cfg.roadmaps_dir, "demo", "Basics@c1.md");

    let report = run(&cfg).unwrap();
    assert_eq!(report.materialize.processed, 1);
    assert_eq!(report.materialize.total_nodes, 3);
    assert_eq!(report.reconcile.nonconvergent, 0);

    let tables = TableStore::new(&cfg.output_dir);
    let rows = tables.read_roadmap("demo").unwrap();
    assert_eq!(rows.len(), 3);

    let c1 = rows.iter().find(|r| r.id == "c1").unwrap();
    assert_eq!(c1.parent_id.as_deref(), Some("r1"));
    assert_eq!(c1.parent_label.as_deref(), Some("Demo"));
    assert!(c1.has_content_reference());

    let c2 = rows.iter().find(|r| r.id == "c2").unwrap();
    assert_eq!(c2.parent_id.as_deref(), Some("r1"));
    assert!(!c2.has_content_reference());

    // Validator: one correct pair, no defects.
    let v = &report.validation.report;
    assert_eq!(v.correct, 1);
    assert_eq!(v.unreferenced_content, 0);
    assert_eq!(v.dangling_references, 0);
    assert_eq!(v.stale_references, 0);
    assert_eq!(v.broken_paths, 0);
    assert!(v.is_clean());

    // Hierarchy ratio: 2 of 3 nodes have a parent.
    let stats = roadmap_pipeline::hierarchy_stats_all(&cfg).unwrap();
    assert!((stats[0].hierarchy_ratio() - 66.666).abs() < 0.01);
}

#[test]
fn deleted_content_is_detected_then_repaired() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = PipelineConfig::new(tmp.path().join("roadmaps"), tmp.path().join("out"));
    write_doc(&cfg.roadmaps_dir, "demo", DEMO_DOC);
    write_content(&cfg.roadmaps_dir, "demo", "Basics@c1.md");
    materialize_all(&cfg).unwrap();

    // Drift: the content file disappears after materialization.
    fs::remove_file(
        cfg.roadmaps_dir
            .join("demo")
            .join("content")
            .join("Basics@c1.md"),
    )
    .unwrap();

    let before = validate_all(&cfg).unwrap();
    assert_eq!(before.report.dangling_references, 1);
    assert_eq!(before.report.broken_paths, 1);

    let reconciled = reconcile_all(&cfg).unwrap();
    assert_eq!(reconciled.nonconvergent, 0);
    assert_eq!(reconciled.outcomes[0].repairs.orphans_cleared, 1);

    // The cleared pair leaves both universes (neither referenced nor
    // claiming content), so the table re-validates clean.
    let after = validate_all(&cfg).unwrap();
    assert_eq!(after.report.dangling_references, 0);
    assert!(after.report.is_clean());
}

#[test]
fn repair_is_idempotent_across_invocations() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = PipelineConfig::new(tmp.path().join("roadmaps"), tmp.path().join("out"));
    write_doc(&cfg.roadmaps_dir, "demo", DEMO_DOC);
    write_content(&cfg.roadmaps_dir, "demo", "Basics@c1.md");
    materialize_all(&cfg).unwrap();

    // Corrupt the persisted table: stale path and a duplicate row.
    let tables = TableStore::new(&cfg.output_dir);
    let mut rows = tables.read_roadmap("demo").unwrap();
    rows[1].content_file_path = Some("/stale/Basics@c1.md".into());
    let dup = rows[1].clone();
    rows.push(dup);
    store::write_rows(&tables.roadmap_table_path("demo"), &rows).unwrap();

    let first = reconcile_all(&cfg).unwrap();
    assert_eq!(first.outcomes[0].repairs.duplicates_removed, 1);
    assert_eq!(first.outcomes[0].repairs.stale_corrected, 1);
    let table_after_first = fs::read(tables.roadmap_table_path("demo")).unwrap();

    let second = reconcile_all(&cfg).unwrap();
    assert_eq!(second.outcomes[0].passes, 0);
    assert!(!second.outcomes[0].repairs.changed());
    let table_after_second = fs::read(tables.roadmap_table_path("demo")).unwrap();
    assert_eq!(table_after_first, table_after_second);
}

#[test]
fn content_does_not_cross_bind_between_roadmaps() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = PipelineConfig::new(tmp.path().join("roadmaps"), tmp.path().join("out"));
    write_doc(&cfg.roadmaps_dir, "go", r#"{ "nodes": [ { "id": "n42" } ] }"#);
    write_doc(&cfg.roadmaps_dir, "rust", r#"{ "nodes": [ { "id": "n42" } ] }"#);
    write_content(&cfg.roadmaps_dir, "go", "Intro@n42.md");

    materialize_all(&cfg).unwrap();
    let tables = TableStore::new(&cfg.output_dir);

    let go = tables.read_roadmap("go").unwrap();
    assert!(go[0].has_content_reference());
    assert!(go[0]
        .content_file_path
        .as_deref()
        .unwrap()
        .contains("go"));

    let rust = tables.read_roadmap("rust").unwrap();
    assert!(!rust[0].has_content_reference());
}

#[test]
fn naming_violations_are_counted_not_referenced() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = PipelineConfig::new(tmp.path().join("roadmaps"), tmp.path().join("out"));
    write_doc(&cfg.roadmaps_dir, "go", r#"{ "nodes": [ { "id": "readme" } ] }"#);
    write_content(&cfg.roadmaps_dir, "go", "readme.md");

    let summary = materialize_all(&cfg).unwrap();
    assert_eq!(summary.naming_violations, 1);

    let tables = TableStore::new(&cfg.output_dir);
    let rows = tables.read_roadmap("go").unwrap();
    assert!(!rows[0].has_content_reference());
}

#[test]
fn global_table_concatenates_in_discovery_order() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = PipelineConfig::new(tmp.path().join("roadmaps"), tmp.path().join("out"));
    write_doc(&cfg.roadmaps_dir, "rust", r#"{ "nodes": [ { "id": "b" } ] }"#);
    write_doc(&cfg.roadmaps_dir, "go", r#"{ "nodes": [ { "id": "a" } ] }"#);

    materialize_all(&cfg).unwrap();
    let tables = TableStore::new(&cfg.output_dir);
    let global = store::read_rows(&tables.global_table_path()).unwrap();
    // Discovery is name-sorted, so go precedes rust.
    assert_eq!(global.len(), 2);
    assert_eq!(global[0].roadmap, "go");
    assert_eq!(global[1].roadmap, "rust");
}
