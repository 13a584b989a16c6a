//! Parent resolution from the edge list.
//!
//! Edges are folded into a child-to-parent map in document order. If several
//! edges target the same child, the last one observed wins and earlier
//! parents are discarded -- that tie-break is load-bearing for downstream
//! consumers, so it is preserved exactly, but each overwrite is counted so
//! multi-parent collisions are visible in reports instead of silent.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::edge::GraphEdge;
use crate::node::GraphNode;

/// A resolved parent reference for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLink {
    /// Parent node identifier.
    pub id: String,
    /// Parent display label; empty when the parent id is dangling.
    pub label: String,
    /// `true` when the parent id does not exist in the node set.
    pub dangling: bool,
}

/// Child-to-parent mapping derived from a document's edge list.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    child_to_parent: HashMap<String, String>,
    /// Number of edges that overwrote a previously recorded parent.
    pub parent_collisions: u32,
}

impl Hierarchy {
    /// Resolves the hierarchy from edges in document order, last edge wins.
    ///
    /// Edges with an empty source or target are skipped entirely.
    pub fn resolve(edges: &[GraphEdge]) -> Self {
        let mut child_to_parent = HashMap::new();
        let mut parent_collisions = 0;
        for edge in edges {
            if !edge.is_wellformed() {
                continue;
            }
            if child_to_parent
                .insert(edge.target.clone(), edge.source.clone())
                .is_some()
            {
                parent_collisions += 1;
            }
        }
        Hierarchy {
            child_to_parent,
            parent_collisions,
        }
    }

    /// Returns the resolved parent id for a node, if it has an incoming edge.
    pub fn parent_of(&self, node_id: &str) -> Option<&str> {
        self.child_to_parent.get(node_id).map(String::as_str)
    }

    /// Returns `true` when the node has no incoming edge.
    pub fn is_root(&self, node_id: &str) -> bool {
        !self.child_to_parent.contains_key(node_id)
    }

    /// Looks up the parent link for a node, resolving the parent's label
    /// from the id map. A parent id absent from the node set yields an
    /// empty label and is marked dangling (a defect, not a crash).
    pub fn parent_link(
        &self,
        node_id: &str,
        nodes_by_id: &IndexMap<String, GraphNode>,
    ) -> Option<ParentLink> {
        let parent_id = self.parent_of(node_id)?;
        match nodes_by_id.get(parent_id) {
            Some(parent) => Some(ParentLink {
                id: parent_id.to_string(),
                label: parent.label().to_string(),
                dangling: false,
            }),
            None => Some(ParentLink {
                id: parent_id.to_string(),
                label: String::new(),
                dangling: true,
            }),
        }
    }

    /// Number of nodes that have a resolved parent.
    pub fn child_count(&self) -> usize {
        self.child_to_parent.len()
    }
}
