//! Pairwise document similarity
//!
//! Additive and unnormalized: a shared category, each shared tag, keyword
//! and topic, and an equal complexity grade add their configured weights.

use std::collections::HashSet;

use serde::Serialize;

use crate::config::SimilarityConfig;
use crate::domain::document::Document;

/// A candidate ranked against a reference document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedDocument {
    pub document: Document,
    pub score: f32,
}

/// Scores and ranks related documents
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    config: SimilarityConfig,
}

impl SimilarityEngine {
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    /// Similarity score between two documents
    pub fn similarity(&self, a: &Document, b: &Document) -> f32 {
        let mut score = 0.0;

        if let (Some(left), Some(right)) = (a.category(), b.category()) {
            if left == right {
                score += self.config.category_weight;
            }
        }

        let tags: HashSet<&str> = a.graph_tags().collect();
        let shared_tags = b.graph_tags().filter(|t| tags.contains(t)).count();
        score += self.config.tag_weight * shared_tags as f32;
        score += self.config.keyword_weight
            * shared_count(&a.metadata.keywords, &b.metadata.keywords) as f32;
        score += self.config.topic_weight
            * shared_count(&a.metadata.topics, &b.metadata.topics) as f32;

        if a.metadata.complexity.is_some() && a.metadata.complexity == b.metadata.complexity {
            score += self.config.complexity_weight;
        }

        score
    }

    /// Top `limit` candidates by score, ties kept in candidate order
    ///
    /// The reference document itself is never returned.
    pub fn rank(
        &self,
        reference: &Document,
        candidates: &[Document],
        limit: usize,
    ) -> Vec<RelatedDocument> {
        let mut related: Vec<RelatedDocument> = candidates
            .iter()
            .filter(|c| c.id != reference.id)
            .map(|c| RelatedDocument {
                score: self.similarity(reference, c),
                document: c.clone(),
            })
            .collect();

        related.sort_by(|a, b| b.score.total_cmp(&a.score));
        related.truncate(limit);
        related
    }
}

/// Number of distinct values present in both lists
fn shared_count(a: &[String], b: &[String]) -> usize {
    let left: HashSet<&str> = a.iter().map(String::as_str).collect();
    let right: HashSet<&str> = b.iter().map(String::as_str).collect();
    left.intersection(&right).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Complexity;

    fn engine() -> SimilarityEngine {
        SimilarityEngine::new(SimilarityConfig::default())
    }

    fn alpha() -> Document {
        Document::with_id("A", "Alpha", "")
            .with_category("security")
            .with_tags(["x", "y"])
    }

    fn beta() -> Document {
        Document::with_id("B", "Beta", "")
            .with_category("security")
            .with_tags(["y", "z"])
    }

    #[test]
    fn test_category_and_shared_tag() {
        assert_eq!(engine().similarity(&alpha(), &beta()), 8.0);
    }

    #[test]
    fn test_all_components() {
        let a = alpha()
            .with_keywords(["jwt", "jwt", "oauth"])
            .with_topics(["auth"])
            .with_complexity(Complexity::Advanced);
        let b = beta()
            .with_keywords(["jwt", "oauth", "saml"])
            .with_topics(["auth", "identity"])
            .with_complexity(Complexity::Advanced);

        // 5 + 3×1 + 2×2 + 2×1 + 1
        assert_eq!(engine().similarity(&a, &b), 15.0);
    }

    #[test]
    fn test_blank_categories_do_not_match() {
        let a = Document::with_id("a", "a", "").with_category("");
        let b = Document::with_id("b", "b", "").with_category("");
        assert_eq!(engine().similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_rank_excludes_reference_and_respects_limit() {
        let docs = vec![alpha(), beta(), Document::with_id("C", "Gamma", "")];
        let related = engine().rank(&docs[0], &docs, 1);

        assert_eq!(related.len(), 1);
        assert_eq!(related[0].document.id, "B");
        assert_eq!(related[0].score, 8.0);
    }

    #[test]
    fn test_rank_keeps_zero_scores_in_store_order() {
        let docs = vec![
            alpha(),
            Document::with_id("C", "Gamma", ""),
            Document::with_id("D", "Delta", ""),
            beta(),
        ];
        let related = engine().rank(&docs[0], &docs, 10);

        let ids: Vec<_> = related.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C", "D"]);
    }
}
