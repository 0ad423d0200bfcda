//! Knowledge base documents
//!
//! Documents are owned by the document store; the graph builder and the
//! relevance engines treat them as immutable input.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::relationship::Relationship;

/// A knowledge base document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique, stable identifier
    pub id: String,
    pub title: String,
    /// Plain text body
    pub content: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    /// Explicit relationships declared by this document
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub owner_id: String,
}

impl Document {
    /// Create a new document with a random id
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, content)
    }

    /// Create a new document with a caller-chosen id
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            metadata: DocumentMetadata::default(),
            relationships: Vec::new(),
            created_at: now,
            updated_at: now,
            owner_id: String::new(),
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.metadata.category = Some(category.into());
        self
    }

    /// Add tags
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.metadata.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set keywords (order is preserved)
    pub fn with_keywords<I, T>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.metadata.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set topics
    pub fn with_topics<I, T>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.metadata.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.metadata.complexity = Some(complexity);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.metadata.author = Some(author.into());
        self
    }

    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Add an explicit relationship
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Non-empty category, if any
    pub fn category(&self) -> Option<&str> {
        self.metadata
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }

    /// The declared author, falling back to the owner id
    pub fn author(&self) -> Option<&str> {
        self.metadata
            .author
            .as_deref()
            .filter(|a| !a.is_empty())
            .or_else(|| Some(self.owner_id.as_str()).filter(|o| !o.is_empty()))
    }

    /// Tags that can become graph nodes (blank tags are ignored)
    pub fn graph_tags(&self) -> impl Iterator<Item = &str> {
        self.metadata
            .tags
            .iter()
            .map(String::as_str)
            .filter(|t| !t.trim().is_empty())
    }
}

/// Metadata extracted from a document at ingestion time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentMetadata {
    pub category: Option<String>,
    pub tags: BTreeSet<String>,
    pub keywords: Vec<String>,
    pub topics: Vec<String>,
    /// Unset when the document was never graded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
    /// Estimated reading time in minutes
    pub estimated_read_time: u32,
    pub description: Option<String>,
    pub author: Option<String>,
}

/// Reading difficulty of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Complexity {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
