pub mod content;
pub mod edge;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod node;
pub mod row;

// Re-export commonly used types
pub use content::{ContentFile, ContentIndex};
pub use edge::GraphEdge;
pub use error::CoreError;
pub use graph::{discover_roadmaps, RoadmapGraph, RoadmapSource};
pub use hierarchy::{Hierarchy, ParentLink};
pub use node::{GraphNode, NodeData, NodeStyle, Position};
pub use row::DerivedRow;
