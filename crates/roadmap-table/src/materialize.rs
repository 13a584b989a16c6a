//! The node-to-row join.
//!
//! For each node of a loaded graph (in document order), builds one
//! [`DerivedRow`] by joining node attributes, the hierarchy's parent lookup,
//! and the content index's binding for the node. Re-running on an unchanged
//! document produces an identical row vector.

use roadmap_core::{ContentIndex, DerivedRow, GraphNode, Hierarchy, RoadmapGraph};

use crate::summary::RoadmapSummary;

/// Output of materializing one roadmap document.
#[derive(Debug, Clone)]
pub struct MaterializedRoadmap {
    /// One row per node, in document order (duplicates preserved).
    pub rows: Vec<DerivedRow>,
    /// Aggregate computed in the same pass.
    pub summary: RoadmapSummary,
    /// Parent references pointing at identifiers absent from the node set.
    pub dangling_parents: u32,
}

/// Materializes one roadmap's derived rows from its graph, hierarchy, and
/// content index.
pub fn materialize(
    graph: &RoadmapGraph,
    hierarchy: &Hierarchy,
    index: &ContentIndex,
) -> MaterializedRoadmap {
    let mut rows = Vec::with_capacity(graph.nodes.len());
    let mut dangling_parents = 0;
    let mut type_tags = std::collections::HashSet::new();

    for node in &graph.nodes {
        let parent = hierarchy.parent_link(&node.id, &graph.nodes_by_id);
        if parent.as_ref().map_or(false, |p| p.dangling) {
            dangling_parents += 1;
        }
        let content_path = index
            .get(&node.id)
            .map(|cf| cf.path.to_string_lossy().into_owned());
        if !node.node_type.is_empty() {
            type_tags.insert(node.node_type.clone());
        }

        rows.push(build_row(&graph.roadmap, node, parent, content_path));
    }

    let file_name = graph
        .source_file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let summary = RoadmapSummary {
        roadmap: graph.roadmap.clone(),
        file_name,
        total_nodes: rows.len(),
        node_types: type_tags.len(),
    };

    MaterializedRoadmap {
        rows,
        summary,
        dangling_parents,
    }
}

fn build_row(
    roadmap: &str,
    node: &GraphNode,
    parent: Option<roadmap_core::ParentLink>,
    content_path: Option<String>,
) -> DerivedRow {
    let style = node.style();
    let (parent_id, parent_label) = match parent {
        Some(link) => {
            let label = if link.label.is_empty() {
                None
            } else {
                Some(link.label)
            };
            (Some(link.id), label)
        }
        None => (None, None),
    };

    DerivedRow {
        roadmap: roadmap.to_string(),
        id: node.id.clone(),
        node_type: node.node_type.clone(),
        position_x: node.position.and_then(|p| p.x),
        position_y: node.position.and_then(|p| p.y),
        width: node.width,
        height: node.height,
        label: node.label().to_string(),
        parent_id,
        parent_label,
        content_file_path: content_path,
        selected: node.selected,
        dragging: node.dragging,
        z_index: node.z_index,
        font_size: style.and_then(|s| s.font_size),
        background_color: style.and_then(|s| s.background_color.clone()),
        border_color: style.and_then(|s| s.border_color.clone()),
        stroke: style.and_then(|s| s.stroke.clone()),
        stroke_width: style.and_then(|s| s.stroke_width),
        text_align: style.and_then(|s| s.text_align.clone()),
    }
}
