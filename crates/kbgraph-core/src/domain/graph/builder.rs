//! Graph builder
//!
//! Converts a document snapshot into a `KnowledgeGraph`:
//!
//! 1. One node per document
//! 2. One node per distinct category, plus a `parent-child` edge per member
//! 3. One node per distinct tag, plus a `related-by-tag` edge per member
//! 4. One edge per explicit relationship whose endpoints both exist
//!
//! Node and edge ids are derived from names, so rebuilding from an unchanged
//! snapshot yields the same identity sets.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::domain::document::{Document, RelationshipType};

use super::edge::GraphEdge;
use super::model::{GraphStats, KnowledgeGraph};
use super::node::{GraphNode, category_node_id, tag_node_id};

/// Weight of a document → category edge
pub const CATEGORY_EDGE_WEIGHT: f32 = 0.8;

/// Weight of a document → tag edge
pub const TAG_EDGE_WEIGHT: f32 = 0.6;

/// Builds knowledge graphs from document collections
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    edge_ids: HashMap<String, usize>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from the full document collection
    pub fn build(mut self, documents: &[Document]) -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();

        for document in documents {
            if !graph.add_node(GraphNode::document(document)) {
                debug!(document_id = %document.id, "Duplicate document id, keeping first");
            }
        }

        let mut categories = 0;
        let mut tags = 0;

        for document in documents {
            if let Some(category) = document.category() {
                let node_id = category_node_id(category);
                if !graph.contains_node(&node_id) && graph.add_node(GraphNode::category(category)) {
                    categories += 1;
                }
                self.add_edge(
                    &mut graph,
                    &document.id,
                    &node_id,
                    RelationshipType::ParentChild,
                    CATEGORY_EDGE_WEIGHT,
                );
            }

            for tag in document.graph_tags() {
                let node_id = tag_node_id(tag);
                if !graph.contains_node(&node_id) && graph.add_node(GraphNode::tag(tag)) {
                    tags += 1;
                }
                self.add_edge(
                    &mut graph,
                    &document.id,
                    &node_id,
                    RelationshipType::RelatedByTag,
                    TAG_EDGE_WEIGHT,
                );
            }
        }

        let mut dropped = 0usize;
        for document in documents {
            for relationship in &document.relationships {
                let added = self.add_edge(
                    &mut graph,
                    &relationship.source_id,
                    &relationship.target_id,
                    relationship.relationship_type,
                    relationship.effective_weight(),
                );
                if !added {
                    dropped += 1;
                    debug!(
                        source = %relationship.source_id,
                        target = %relationship.target_id,
                        relationship_type = %relationship.relationship_type,
                        "Dropping relationship with unknown endpoint"
                    );
                }
            }
        }

        graph.set_stats(GraphStats {
            document_count: documents.len(),
            categories,
            tags,
            built_at: Utc::now(),
        });

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dropped_relationships = dropped,
            "Knowledge graph built"
        );

        graph
    }

    /// Add an edge with a unique, deterministic id
    ///
    /// Repeated ids within one build get a `#n` suffix in encounter order.
    fn add_edge(
        &mut self,
        graph: &mut KnowledgeGraph,
        source: &str,
        target: &str,
        edge_type: RelationshipType,
        weight: f32,
    ) -> bool {
        if !graph.contains_node(source) || !graph.contains_node(target) {
            return false;
        }

        let mut edge = GraphEdge::new(source, target, edge_type, weight);
        let seen = self.edge_ids.entry(edge.id.clone()).or_insert(0);
        *seen += 1;
        if *seen > 1 {
            edge.id = format!("{}#{}", edge.id, seen);
        }
        graph.add_edge(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Relationship;
    use crate::domain::graph::NodeKind;

    fn security_docs() -> Vec<Document> {
        vec![
            Document::with_id("A", "Alpha", "").with_category("security").with_tags(["x", "y"]),
            Document::with_id("B", "Beta", "").with_category("security").with_tags(["y", "z"]),
        ]
    }

    #[test]
    fn test_category_and_tag_graph() {
        let graph = GraphBuilder::new().build(&security_docs());

        let mut ids: Vec<_> = graph.node_ids().into_iter().collect();
        ids.sort();
        assert_eq!(ids, vec!["A", "B", "category-security", "tag-x", "tag-y", "tag-z"]);
        assert_eq!(graph.edge_count(), 6);

        let weight = |source: &str, target: &str| {
            graph
                .edges()
                .iter()
                .find(|e| e.source_node_id == source && e.target_node_id == target)
                .map(|e| (e.edge_type, e.weight))
        };
        assert_eq!(
            weight("A", "category-security"),
            Some((RelationshipType::ParentChild, 0.8))
        );
        assert_eq!(weight("A", "tag-x"), Some((RelationshipType::RelatedByTag, 0.6)));
        assert_eq!(weight("B", "tag-z"), Some((RelationshipType::RelatedByTag, 0.6)));

        let stats = graph.stats();
        assert_eq!(stats.document_count, 2);
        assert_eq!(stats.categories, 1);
        assert_eq!(stats.tags, 3);
    }

    #[test]
    fn test_explicit_relationships() {
        let docs = vec![
            Document::with_id("A", "Alpha", "")
                .with_relationship(Relationship::new("A", "B", RelationshipType::Prerequisite))
                .with_relationship(
                    Relationship::new("A", "missing", RelationshipType::References).with_weight(0.9),
                ),
            Document::with_id("B", "Beta", "")
                .with_relationship(Relationship::new("B", "A", RelationshipType::FollowUp).with_weight(0.7)),
        ];

        let graph = GraphBuilder::new().build(&docs);
        assert_eq!(graph.edge_count(), 2);

        let prerequisite = graph.edges_of_type(RelationshipType::Prerequisite)[0];
        assert_eq!(prerequisite.weight, 0.5);
        let follow_up = graph.edges_of_type(RelationshipType::FollowUp)[0];
        assert_eq!(follow_up.weight, 0.7);
    }

    #[test]
    fn test_documents_without_metadata_are_plain_nodes() {
        let docs = vec![Document::with_id("solo", "Solo", "").with_category("")];
        let graph = GraphBuilder::new().build(&docs);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.nodes_of_kind(NodeKind::Category).count(), 0);
    }

    #[test]
    fn test_whitespace_only_category_and_tags_emit_nothing() {
        let docs = vec![
            Document::with_id("A", "Alpha", "").with_category("   ").with_tags(["\t", "rust", ""]),
        ];
        let graph = GraphBuilder::new().build(&docs);

        let mut ids: Vec<_> = graph.node_ids().into_iter().collect();
        ids.sort();
        assert_eq!(ids, vec!["A", "tag-rust"]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.stats().categories, 0);
        assert_eq!(graph.stats().tags, 1);
    }

    #[test]
    fn test_self_and_duplicate_relationships_get_distinct_ids() {
        let rel = Relationship::new("A", "A", RelationshipType::Custom);
        let docs = vec![
            Document::with_id("A", "Alpha", "")
                .with_relationship(rel.clone())
                .with_relationship(rel),
        ];

        let graph = GraphBuilder::new().build(&docs);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edge_ids().contains("A--custom-->A"));
        assert!(graph.edge_ids().contains("A--custom-->A#2"));
    }

    #[test]
    fn test_empty_collection() {
        let graph = GraphBuilder::new().build(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.stats().document_count, 0);
    }
}
