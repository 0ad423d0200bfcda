//! kbgraph Core Library
//!
//! This crate provides the core functionality for kbgraph, including:
//! - Document model and the document store port
//! - Knowledge graph building (documents, categories, tags, relationships)
//! - Relevance search and related-document recommendations
//! - Force-directed layout on a bounded canvas
//! - Interaction state (drag, pan/zoom, edge filters, selection)
//! - JSON file and in-memory document stores

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::domain::document::{
        Complexity, Document, DocumentMetadata, DocumentStore, Relationship, RelationshipType,
    };
    pub use crate::domain::graph::{GraphEdge, GraphNode, KnowledgeGraph, NodeKind, Position};
    pub use crate::domain::interaction::InteractionState;
    pub use crate::domain::knowledge::{KnowledgeGraphService, KnowledgeStats};
    pub use crate::domain::layout::Canvas;
    pub use crate::domain::search::{RelatedDocument, SearchFilters, SearchResult};
    pub use crate::error::{Error, Result};
    pub use crate::infrastructure::document::{InMemoryDocumentStore, JsonFileDocumentStore};
}

#[cfg(test)]
mod config_tests;
