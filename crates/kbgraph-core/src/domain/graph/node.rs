//! Graph nodes and positions

use serde::{Deserialize, Serialize};

use crate::domain::document::{Document, DocumentMetadata};

/// A point on the layout canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Kind of entity a node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Document,
    Category,
    Tag,
    Topic,
    Author,
}

impl NodeKind {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Category => "category",
            Self::Tag => "tag",
            Self::Topic => "topic",
            Self::Author => "author",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Node id for a category name
pub fn category_node_id(name: &str) -> String {
    format!("category-{}", name)
}

/// Node id for a tag name
pub fn tag_node_id(name: &str) -> String {
    format!("tag-{}", name)
}

/// A node in the knowledge graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Unique within one graph instance
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    /// Backing document metadata (document nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
    pub position: Position,
    /// Present while the node is pinned by user interaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<Position>,
}

impl GraphNode {
    /// Create a node at the origin
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            metadata: None,
            position: Position::default(),
            pinned: None,
        }
    }

    /// Document node; its id is the raw document id
    pub fn document(document: &Document) -> Self {
        Self {
            metadata: Some(document.metadata.clone()),
            ..Self::new(document.id.clone(), document.title.clone(), NodeKind::Document)
        }
    }

    pub fn category(name: &str) -> Self {
        Self::new(category_node_id(name), name, NodeKind::Category)
    }

    pub fn tag(name: &str) -> Self {
        Self::new(tag_node_id(name), name, NodeKind::Tag)
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }

    /// Pin the node at a position; the simulator will not move it
    pub fn pin(&mut self, position: Position) {
        self.position = position;
        self.pinned = Some(position);
    }

    /// Release the pin, keeping the current position
    pub fn unpin(&mut self) {
        self.pinned = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_derived_from_kind_and_name() {
        assert_eq!(GraphNode::category("security").id, "category-security");
        assert_eq!(GraphNode::tag("x").id, "tag-x");

        let doc = Document::with_id("A", "Alpha", "");
        let node = GraphNode::document(&doc);
        assert_eq!(node.id, "A");
        assert_eq!(node.label, "Alpha");
        assert_eq!(node.kind, NodeKind::Document);
        assert!(node.metadata.is_some());
    }

    #[test]
    fn test_pin_and_unpin() {
        let mut node = GraphNode::tag("x");
        node.pin(Position::new(10.0, 20.0));
        assert!(node.is_pinned());
        assert_eq!(node.position, Position::new(10.0, 20.0));

        node.unpin();
        assert!(!node.is_pinned());
        assert_eq!(node.position, Position::new(10.0, 20.0));
    }

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < f32::EPSILON);
    }
}
