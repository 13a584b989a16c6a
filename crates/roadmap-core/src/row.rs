//! The denormalized per-node record persisted to the node tables.
//!
//! [`DerivedRow`] joins a node's own attributes with its resolved parent and
//! content binding. Field order here is the serialized column order and is
//! significant for downstream consumers; optional fields are `Option` in the
//! API and empty fields in the serialized table.

use serde::{Deserialize, Serialize};

/// One flattened row of a roadmap node table.
///
/// Created fresh on every materialization run; mutated in place only by the
/// reference repairer. The `(roadmap, id)` pair is unique after
/// deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    /// Owning roadmap name.
    pub roadmap: String,
    /// Node identifier.
    pub id: String,
    /// Declared node type tag.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Layout x coordinate.
    pub position_x: Option<f64>,
    /// Layout y coordinate.
    pub position_y: Option<f64>,
    /// Rendered width.
    pub width: Option<f64>,
    /// Rendered height.
    pub height: Option<f64>,
    /// Display label.
    pub label: String,
    /// Resolved parent identifier; `None` for roots.
    pub parent_id: Option<String>,
    /// Resolved parent label; `None` for roots and dangling parents.
    pub parent_label: Option<String>,
    /// Path of the bound content file; `None` when unresolved.
    pub content_file_path: Option<String>,
    /// Transient UI selection flag.
    pub selected: bool,
    /// Transient UI dragging flag.
    pub dragging: bool,
    /// Stacking order.
    #[serde(rename = "zIndex")]
    pub z_index: Option<f64>,
    /// Label font size.
    #[serde(rename = "fontSize")]
    pub font_size: Option<f64>,
    /// Fill color.
    #[serde(rename = "backgroundColor")]
    pub background_color: Option<String>,
    /// Border color.
    #[serde(rename = "borderColor")]
    pub border_color: Option<String>,
    /// Stroke color.
    pub stroke: Option<String>,
    /// Stroke width.
    #[serde(rename = "strokeWidth")]
    pub stroke_width: Option<f64>,
    /// Text alignment.
    #[serde(rename = "textAlign")]
    pub text_align: Option<String>,
}

impl DerivedRow {
    /// Returns `true` when the row claims a content file.
    pub fn has_content_reference(&self) -> bool {
        self.content_file_path
            .as_deref()
            .map_or(false, |p| !p.is_empty())
    }

    /// Returns `true` when the row has no resolved parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.as_deref().map_or(true, str::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(parent: Option<&str>, content: Option<&str>) -> DerivedRow {
        DerivedRow {
            roadmap: "demo".into(),
            id: "n1".into(),
            node_type: "topic".into(),
            position_x: None,
            position_y: None,
            width: None,
            height: None,
            label: "Node".into(),
            parent_id: parent.map(String::from),
            parent_label: None,
            content_file_path: content.map(String::from),
            selected: false,
            dragging: false,
            z_index: None,
            font_size: None,
            background_color: None,
            border_color: None,
            stroke: None,
            stroke_width: None,
            text_align: None,
        }
    }

    #[test]
    fn root_detection() {
        assert!(row(None, None).is_root());
        assert!(row(Some(""), None).is_root());
        assert!(!row(Some("r1"), None).is_root());
    }

    #[test]
    fn content_reference_detection() {
        assert!(!row(None, None).has_content_reference());
        assert!(!row(None, Some("")).has_content_reference());
        assert!(row(None, Some("a/b.md")).has_content_reference());
    }
}
