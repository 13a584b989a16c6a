//! Node types for roadmap graph documents.
//!
//! [`GraphNode`] mirrors one element of a document's `nodes` list. Every
//! field except `id` is optional in the wild; missing fields deserialize to
//! `None` or an empty default rather than failing the whole document.
//! Absence is modeled with `Option` here -- the empty-string sentinel exists
//! only in the serialized table format.

use serde::{Deserialize, Serialize};

/// 2-D layout position of a node on the roadmap canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    #[serde(default)]
    pub x: Option<f64>,
    /// Vertical coordinate.
    #[serde(default)]
    pub y: Option<f64>,
}

/// Visual style attributes attached to a node's `data.style` block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeStyle {
    /// Label font size in points.
    #[serde(default, rename = "fontSize")]
    pub font_size: Option<f64>,
    /// Fill color.
    #[serde(default, rename = "backgroundColor")]
    pub background_color: Option<String>,
    /// Border color.
    #[serde(default, rename = "borderColor")]
    pub border_color: Option<String>,
    /// Stroke color.
    #[serde(default)]
    pub stroke: Option<String>,
    /// Stroke width in pixels.
    #[serde(default, rename = "strokeWidth")]
    pub stroke_width: Option<f64>,
    /// Text alignment (`left`/`center`/`right`).
    #[serde(default, rename = "textAlign")]
    pub text_align: Option<String>,
}

/// The `data` payload of a node: display label plus optional style block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeData {
    /// Human-readable display label.
    #[serde(default)]
    pub label: String,
    /// Visual style attributes, absent for plain nodes.
    #[serde(default)]
    pub style: Option<NodeStyle>,
}

/// One node of a roadmap graph document.
///
/// Immutable once loaded for a given run. A node with a missing `id`
/// deserializes with an empty identifier and still produces a derived row,
/// matching the permissive document handling of the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphNode {
    /// Identifier, unique within a roadmap (not enforced at load time;
    /// duplicates surface as duplicate derived rows for the repairer).
    #[serde(default)]
    pub id: String,
    /// Declared type tag (e.g. `topic`, `subtopic`, `section`, `title`).
    #[serde(default, rename = "type")]
    pub node_type: String,
    /// Layout position.
    #[serde(default)]
    pub position: Option<Position>,
    /// Rendered width.
    #[serde(default)]
    pub width: Option<f64>,
    /// Rendered height.
    #[serde(default)]
    pub height: Option<f64>,
    /// Label and style payload.
    #[serde(default)]
    pub data: NodeData,
    /// Transient UI selection flag.
    #[serde(default)]
    pub selected: bool,
    /// Transient UI dragging flag.
    #[serde(default)]
    pub dragging: bool,
    /// Stacking order.
    #[serde(default, rename = "zIndex")]
    pub z_index: Option<f64>,
}

impl GraphNode {
    /// Returns the display label.
    pub fn label(&self) -> &str {
        &self.data.label
    }

    /// Returns the style block when present.
    pub fn style(&self) -> Option<&NodeStyle> {
        self.data.style.as_ref()
    }
}
