//! Edge type for roadmap graph documents.
//!
//! A [`GraphEdge`] is a directed prerequisite/containment relation: the
//! source is interpreted as the parent of the target.

use serde::{Deserialize, Serialize};

/// One directed edge of a roadmap graph document.
///
/// Edges are not required to be unique per target. When multiple edges share
/// a target, parent resolution keeps the last one observed in document order
/// (see [`crate::hierarchy`]).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Parent node identifier.
    #[serde(default)]
    pub source: String,
    /// Child node identifier.
    #[serde(default)]
    pub target: String,
}

impl GraphEdge {
    /// Returns `true` when both endpoints are non-empty.
    ///
    /// Edges with an empty endpoint are skipped during hierarchy resolution.
    pub fn is_wellformed(&self) -> bool {
        !self.source.is_empty() && !self.target.is_empty()
    }
}
