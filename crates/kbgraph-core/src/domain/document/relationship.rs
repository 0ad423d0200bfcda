//! Explicit relationships between documents
//!
//! Relationships are declared in document metadata, as opposed to the
//! category and tag edges the graph builder derives structurally.

use serde::{Deserialize, Serialize};

/// Weight applied when a relationship does not declare one
pub const DEFAULT_RELATIONSHIP_WEIGHT: f32 = 0.5;

fn default_weight() -> f32 {
    DEFAULT_RELATIONSHIP_WEIGHT
}

/// A typed, weighted edge between two documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub source_id: String,
    pub target_id: String,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
    /// Strength of the relationship (0.0 to 1.0)
    #[serde(default = "default_weight")]
    pub weight: f32,
}

impl Relationship {
    /// Create a new relationship with the default weight
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            relationship_type,
            weight: DEFAULT_RELATIONSHIP_WEIGHT,
        }
    }

    /// Set the weight
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Weight clamped into 0.0-1.0; non-finite weights fall back to the default
    pub fn effective_weight(&self) -> f32 {
        if self.weight.is_finite() {
            self.weight.clamp(0.0, 1.0)
        } else {
            DEFAULT_RELATIONSHIP_WEIGHT
        }
    }

    pub fn is_self_reference(&self) -> bool {
        self.source_id == self.target_id
    }
}

/// Types of relationships between graph nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    /// Source cites or links to target
    References,
    /// Derived from a shared tag
    RelatedByTag,
    /// Derived from a shared topic
    RelatedByTopic,
    /// Source should be read before target
    Prerequisite,
    /// Source continues where target left off
    FollowUp,
    /// Source covers the same ground differently
    Alternative,
    /// Containment, e.g. document to category
    ParentChild,
    Custom,
}

impl RelationshipType {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::References => "references",
            Self::RelatedByTag => "related-by-tag",
            Self::RelatedByTopic => "related-by-topic",
            Self::Prerequisite => "prerequisite",
            Self::FollowUp => "follow-up",
            Self::Alternative => "alternative",
            Self::ParentChild => "parent-child",
            Self::Custom => "custom",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "references" => Some(Self::References),
            "related-by-tag" => Some(Self::RelatedByTag),
            "related-by-topic" => Some(Self::RelatedByTopic),
            "prerequisite" => Some(Self::Prerequisite),
            "follow-up" => Some(Self::FollowUp),
            "alternative" => Some(Self::Alternative),
            "parent-child" => Some(Self::ParentChild),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Get all relationship types
    pub fn all() -> &'static [RelationshipType] {
        &[
            Self::References,
            Self::RelatedByTag,
            Self::RelatedByTopic,
            Self::Prerequisite,
            Self::FollowUp,
            Self::Alternative,
            Self::ParentChild,
            Self::Custom,
        ]
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
