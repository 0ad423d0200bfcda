//! Document store port
//!
//! The core never reaches persistence directly: every graph build and query
//! reads a snapshot through this trait. Adapters live in `infrastructure`.

use async_trait::async_trait;

use crate::error::Result;

use super::entity::Document;

/// Repository trait for the canonical document collection
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List every document, in the store's enumeration order
    ///
    /// Fails with `StoreUnavailable` when the backing store cannot be reached.
    async fn list_documents(&self) -> Result<Vec<Document>>;

    /// Get a document by ID
    async fn get_document(&self, id: &str) -> Result<Option<Document>>;

    /// Save a document (insert or replace by ID)
    async fn save_document(&self, document: &Document) -> Result<()>;

    /// Delete a document by ID
    async fn delete_document(&self, id: &str) -> Result<bool>;

    /// Count documents
    async fn count_documents(&self) -> Result<usize> {
        Ok(self.list_documents().await?.len())
    }
}
