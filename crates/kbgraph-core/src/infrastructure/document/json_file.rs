//! JSON file document store
//!
//! The whole collection lives in one pretty-printed JSON array. Every call
//! re-reads the file, so each graph build sees the latest snapshot.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::document::{Document, DocumentStore};
use crate::error::{Error, Result};

/// Document store persisted as a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileDocumentStore {
    path: PathBuf,
}

impl JsonFileDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Document>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Document file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(Error::StoreUnavailable(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            Error::StoreUnavailable(format!("cannot parse {}: {}", self.path.display(), e))
        })
    }

    async fn write_all(&self, documents: &[Document]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(documents)?;
        fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), documents = documents.len(), "Document file written");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileDocumentStore {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        self.read_all().await
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        Ok(self.read_all().await?.into_iter().find(|d| d.id == id))
    }

    async fn save_document(&self, document: &Document) -> Result<()> {
        let mut documents = self.read_all().await?;
        match documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document.clone(),
            None => documents.push(document.clone()),
        }
        self.write_all(&documents).await
    }

    async fn delete_document(&self, id: &str) -> Result<bool> {
        let mut documents = self.read_all().await?;
        let before = documents.len();
        documents.retain(|d| d.id != id);
        if documents.len() == before {
            return Ok(false);
        }
        self.write_all(&documents).await?;
        Ok(true)
    }
}
