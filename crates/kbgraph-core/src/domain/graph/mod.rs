//! Knowledge graph domain module
//!
//! - **GraphNode**: document, category or tag node with a mutable position
//! - **GraphEdge**: typed, weighted edge between two nodes
//! - **KnowledgeGraph**: nodes, edges and build statistics
//! - **GraphBuilder**: derives a graph from a document snapshot

mod builder;
mod edge;
mod model;
mod node;

pub use builder::{CATEGORY_EDGE_WEIGHT, GraphBuilder, TAG_EDGE_WEIGHT};
pub use edge::GraphEdge;
pub use model::{GraphStats, KnowledgeGraph};
pub use node::{GraphNode, NodeKind, Position, category_node_id, tag_node_id};
