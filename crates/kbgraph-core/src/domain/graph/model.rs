//! The knowledge graph structure
//!
//! A graph is always built wholesale from a document snapshot. Nodes keep
//! insertion order and are indexed by id; an edge is only accepted when both
//! of its endpoints are already present.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::document::RelationshipType;

use super::edge::GraphEdge;
use super::node::{GraphNode, NodeKind, Position};

/// Aggregate statistics captured at build time
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub document_count: usize,
    /// Distinct non-empty categories
    pub categories: usize,
    /// Distinct tags
    pub tags: usize,
    pub built_at: DateTime<Utc>,
}

impl Default for GraphStats {
    fn default() -> Self {
        Self {
            document_count: 0,
            categories: 0,
            tags: 0,
            built_at: Utc::now(),
        }
    }
}

/// Typed graph of documents, categories and tags
#[derive(Debug, Clone, Default, Serialize)]
pub struct KnowledgeGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    stats: GraphStats,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl KnowledgeGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; returns false if a node with the same id already exists
    pub fn add_node(&mut self, node: GraphNode) -> bool {
        if self.index.contains_key(&node.id) {
            return false;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Add an edge; returns false (and drops it) if either endpoint is missing
    pub fn add_edge(&mut self, edge: GraphEdge) -> bool {
        if !self.contains_node(&edge.source_node_id) || !self.contains_node(&edge.target_node_id) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub(crate) fn set_stats(&mut self, stats: GraphStats) {
        self.stats = stats;
    }

    pub fn stats(&self) -> &GraphStats {
        &self.stats
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [GraphNode] {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get node by ID
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Get mutable node by ID
    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        let i = *self.index.get(id)?;
        self.nodes.get_mut(i)
    }

    /// Position of the node in `nodes()`
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Get all nodes of a kind
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Edges touching a node, in either direction
    pub fn edges_of(&self, node_id: &str) -> Vec<&GraphEdge> {
        self.edges.iter().filter(|e| e.touches(node_id)).collect()
    }

    /// Edges of one relationship type
    pub fn edges_of_type(&self, edge_type: RelationshipType) -> Vec<&GraphEdge> {
        self.edges.iter().filter(|e| e.edge_type == edge_type).collect()
    }

    /// Distinct neighbour ids of a node, in edge order
    pub fn neighbors(&self, node_id: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.edges
            .iter()
            .filter_map(|e| e.other_end(node_id))
            .filter(|id| *id != node_id && seen.insert(*id))
            .collect()
    }

    /// Snapshot of every node's position, keyed by node id
    ///
    /// Feed this back into the layout simulator to keep positions stable
    /// across rebuilds.
    pub fn positions(&self) -> HashMap<String, Position> {
        self.nodes
            .iter()
            .map(|n| (n.id.clone(), n.position))
            .collect()
    }

    /// Set of node ids
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Set of edge ids
    pub fn edge_ids(&self) -> HashSet<&str> {
        self.edges.iter().map(|e| e.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();
        graph.add_node(GraphNode::new("A", "Alpha", NodeKind::Document));
        graph.add_node(GraphNode::new("B", "Beta", NodeKind::Document));
        graph.add_node(GraphNode::tag("x"));
        graph.add_edge(GraphEdge::new("A", "tag-x", RelationshipType::RelatedByTag, 0.6));
        graph.add_edge(GraphEdge::new("B", "tag-x", RelationshipType::RelatedByTag, 0.6));
        graph.add_edge(GraphEdge::new("A", "B", RelationshipType::References, 0.5));
        graph
    }

    #[test]
    fn test_duplicate_node_is_rejected() {
        let mut graph = KnowledgeGraph::new();
        assert!(graph.add_node(GraphNode::tag("x")));
        assert!(!graph.add_node(GraphNode::tag("x")));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_edge_with_missing_endpoint_is_dropped() {
        let mut graph = KnowledgeGraph::new();
        graph.add_node(GraphNode::tag("x"));
        assert!(!graph.add_edge(GraphEdge::new("ghost", "tag-x", RelationshipType::Custom, 0.5)));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_lookup_and_mutation() {
        let mut graph = sample_graph();
        assert_eq!(graph.node("B").map(|n| n.label.as_str()), Some("Beta"));
        assert_eq!(graph.node_index("tag-x"), Some(2));

        graph.node_mut("A").unwrap().position = Position::new(5.0, 6.0);
        assert_eq!(graph.positions()["A"], Position::new(5.0, 6.0));
    }

    #[test]
    fn test_neighbors_and_incident_edges() {
        let graph = sample_graph();
        assert_eq!(graph.neighbors("A"), vec!["tag-x", "B"]);
        assert_eq!(graph.neighbors("tag-x"), vec!["A", "B"]);
        assert_eq!(graph.edges_of("B").len(), 2);
        assert_eq!(graph.edges_of_type(RelationshipType::RelatedByTag).len(), 2);
        assert_eq!(graph.nodes_of_kind(NodeKind::Document).count(), 2);
    }
}
