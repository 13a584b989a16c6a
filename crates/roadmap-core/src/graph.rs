//! Graph document loading and roadmap discovery.
//!
//! A [`RoadmapGraph`] is the typed form of one roadmap's JSON document:
//! the raw node list in document order, an id lookup map, and the raw edge
//! list. Loading fails softly per document -- a malformed file yields a
//! [`CoreError::MalformedDocument`] that batch callers report and skip
//! without aborting sibling roadmaps.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::edge::GraphEdge;
use crate::error::CoreError;
use crate::node::GraphNode;

/// Raw document shape. A missing `nodes` key is a deserialization error,
/// which is the malformed-document signal; a missing `edges` key is a
/// legitimate leaf document with no hierarchy.
#[derive(Debug, Deserialize)]
struct GraphDoc {
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
}

/// One roadmap's graph document, loaded and typed.
#[derive(Debug, Clone)]
pub struct RoadmapGraph {
    /// Roadmap name (the containing directory's name).
    pub roadmap: String,
    /// Path of the source document.
    pub source_file: PathBuf,
    /// Nodes in document order. Duplicate identifiers are preserved here;
    /// they surface as duplicate derived rows for the repairer to drop.
    pub nodes: Vec<GraphNode>,
    /// Identifier lookup. Insertion-ordered; on duplicate identifiers the
    /// later node's attributes win for lookups.
    pub nodes_by_id: IndexMap<String, GraphNode>,
    /// Raw edge list in document order.
    pub edges: Vec<GraphEdge>,
}

impl RoadmapGraph {
    /// Loads a roadmap graph from a JSON document on disk.
    pub fn load(roadmap: &str, path: &Path) -> Result<Self, CoreError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::SourceNotFound {
                path: path.to_path_buf(),
            },
            _ => CoreError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let doc: GraphDoc =
            serde_json::from_str(&text).map_err(|e| CoreError::MalformedDocument {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_document(roadmap, path, doc.nodes, doc.edges))
    }

    /// Builds a graph from already-parsed parts. Used by `load` and by tests.
    pub fn from_document(
        roadmap: &str,
        source_file: &Path,
        nodes: Vec<GraphNode>,
        edges: Vec<GraphEdge>,
    ) -> Self {
        let mut nodes_by_id = IndexMap::with_capacity(nodes.len());
        for node in &nodes {
            nodes_by_id.insert(node.id.clone(), node.clone());
        }
        RoadmapGraph {
            roadmap: roadmap.to_string(),
            source_file: source_file.to_path_buf(),
            nodes,
            nodes_by_id,
            edges,
        }
    }

    /// Number of nodes in document order (duplicates included).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// A graph document discovered under the roadmaps root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapSource {
    /// Roadmap name (directory name).
    pub roadmap: String,
    /// Full path of the JSON document.
    pub file_path: PathBuf,
    /// Document file name.
    pub file_name: String,
}

/// Discovers every graph document under the roadmaps root.
///
/// Scans each subdirectory for `*.json` files. Directories and files are
/// visited in name order so discovery is deterministic across runs. A
/// missing root is [`CoreError::SourceNotFound`].
pub fn discover_roadmaps(roadmaps_dir: &Path) -> Result<Vec<RoadmapSource>, CoreError> {
    if !roadmaps_dir.is_dir() {
        return Err(CoreError::SourceNotFound {
            path: roadmaps_dir.to_path_buf(),
        });
    }

    let folders: Vec<PathBuf> = read_dir_sorted(roadmaps_dir)?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect();

    let mut sources = Vec::new();
    for folder in folders {
        let roadmap = match folder.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        for path in read_dir_sorted(&folder)? {
            if path.extension().and_then(|e| e.to_str()) != Some("json") || !path.is_file() {
                continue;
            }
            let file_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            sources.push(RoadmapSource {
                roadmap: roadmap.clone(),
                file_path: path,
                file_name,
            });
        }
    }
    Ok(sources)
}

/// Reads a directory's entries sorted by path.
fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, CoreError> {
    let entries = fs::read_dir(dir).map_err(|e| CoreError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CoreError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}
