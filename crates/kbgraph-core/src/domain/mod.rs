//! Domain layer
//!
//! Contains the core business logic and domain models.

pub mod document;
pub mod graph;
pub mod interaction;
pub mod knowledge;
pub mod layout;
pub mod search;
pub mod specification;
