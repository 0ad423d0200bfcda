//! Graph edges

use serde::{Deserialize, Serialize};

use crate::domain::document::RelationshipType;

/// A typed, weighted edge between two graph nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source_node_id: String,
    pub target_node_id: String,
    #[serde(rename = "type")]
    pub edge_type: RelationshipType,
    pub weight: f32,
}

impl GraphEdge {
    /// Create an edge whose id is derived from its endpoints and type
    pub fn new(
        source_node_id: impl Into<String>,
        target_node_id: impl Into<String>,
        edge_type: RelationshipType,
        weight: f32,
    ) -> Self {
        let source_node_id = source_node_id.into();
        let target_node_id = target_node_id.into();
        Self {
            id: Self::derive_id(&source_node_id, &target_node_id, edge_type),
            source_node_id,
            target_node_id,
            edge_type,
            weight,
        }
    }

    /// `<source>--<type>--><target>`
    pub fn derive_id(source: &str, target: &str, edge_type: RelationshipType) -> String {
        format!("{}--{}-->{}", source, edge_type.as_str(), target)
    }

    /// Check whether the edge touches a node
    pub fn touches(&self, node_id: &str) -> bool {
        self.source_node_id == node_id || self.target_node_id == node_id
    }

    /// The endpoint opposite `node_id`, if the edge touches it
    pub fn other_end(&self, node_id: &str) -> Option<&str> {
        if self.source_node_id == node_id {
            Some(&self.target_node_id)
        } else if self.target_node_id == node_id {
            Some(&self.source_node_id)
        } else {
            None
        }
    }
}
