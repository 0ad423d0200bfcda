//! In-memory document store

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::document::{Document, DocumentStore};
use crate::error::{Error, Result};

/// Document store backed by a vector, for tests and embedding
///
/// Enumeration order is insertion order; replacing a document keeps its slot.
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    documents: RwLock<Vec<Document>>,
    available: AtomicBool,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate the backing store going away (or coming back)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::StoreUnavailable("in-memory store is offline".into()))
        }
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::StoreUnavailable("document lock poisoned".into())
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        self.ensure_available()?;
        Ok(self.documents.read().map_err(poisoned)?.clone())
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        self.ensure_available()?;
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents.iter().find(|d| d.id == id).cloned())
    }

    async fn save_document(&self, document: &Document) -> Result<()> {
        self.ensure_available()?;
        let mut documents = self.documents.write().map_err(poisoned)?;
        match documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document.clone(),
            None => documents.push(document.clone()),
        }
        Ok(())
    }

    async fn delete_document(&self, id: &str) -> Result<bool> {
        self.ensure_available()?;
        let mut documents = self.documents.write().map_err(poisoned)?;
        let before = documents.len();
        documents.retain(|d| d.id != id);
        Ok(documents.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryDocumentStore::new();
        assert_eq!(store.count_documents().await.unwrap(), 0);

        store.save_document(&Document::with_id("a", "Alpha", "")).await.unwrap();
        store.save_document(&Document::with_id("b", "Beta", "")).await.unwrap();
        store.save_document(&Document::with_id("a", "Alpha v2", "")).await.unwrap();

        let documents = store.list_documents().await.unwrap();
        let titles: Vec<_> = documents.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha v2", "Beta"]);

        assert!(store.get_document("b").await.unwrap().is_some());
        assert!(store.get_document("zzz").await.unwrap().is_none());

        assert!(store.delete_document("a").await.unwrap());
        assert!(!store.delete_document("a").await.unwrap());
        assert_eq!(store.count_documents().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let store = InMemoryDocumentStore::with_documents(vec![Document::with_id("a", "A", "")]);
        store.set_available(false);

        let err = store.list_documents().await.unwrap_err();
        assert_eq!(err.code(), "E100");
        assert!(store.get_document("a").await.is_err());

        store.set_available(true);
        assert_eq!(store.list_documents().await.unwrap().len(), 1);
    }
}
