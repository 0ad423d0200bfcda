//! Document domain module
//!
//! - **Document**: title, body and metadata as held by the document store
//! - **Relationship**: explicit, typed edge declared by a document
//! - **DocumentStore**: the persistence port every query reads through

mod entity;
mod relationship;
mod repository;

pub use entity::{Complexity, Document, DocumentMetadata};
pub use relationship::{DEFAULT_RELATIONSHIP_WEIGHT, Relationship, RelationshipType};
pub use repository::DocumentStore;
