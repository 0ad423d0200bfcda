//! Knowledge domain module
//!
//! Ties the document store, graph builder, layout simulator and search
//! engines together behind one service.

mod service;

pub use service::{KnowledgeGraphService, KnowledgeStats};
