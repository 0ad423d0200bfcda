//! Relevance scoring
//!
//! Documents are filtered structurally, then matched against the query as a
//! case-insensitive substring. Each matching field adds its configured weight
//! to the score; scores are only meaningful relative to each other.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::SearchConfig;
use crate::domain::document::Document;

use super::filters::SearchFilters;
use super::specification::DocumentFilter;

/// A document field that contributed to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedField {
    Title,
    Description,
    Tags,
    Keywords,
    Content,
    Category,
    Author,
}

impl MatchedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Tags => "tags",
            Self::Keywords => "keywords",
            Self::Content => "content",
            Self::Category => "category",
            Self::Author => "author",
        }
    }
}

impl std::fmt::Display for MatchedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single search hit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub document: Document,
    /// Relevance score (higher is better)
    pub score: f32,
    /// Content sentences containing the query
    pub highlights: Vec<String>,
    pub matched_fields: BTreeSet<MatchedField>,
}

/// Scores documents against search filters
#[derive(Debug, Clone, Default)]
pub struct RelevanceEngine {
    config: SearchConfig,
}

impl RelevanceEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Run a search over a document snapshot
    ///
    /// Results keep the snapshot order; see [`rank_by_score`].
    pub fn search(&self, documents: &[Document], filters: &SearchFilters) -> Vec<SearchResult> {
        let filter = DocumentFilter::from_filters(filters);
        let query = filters.normalized_query();

        documents
            .iter()
            .filter_map(|document| {
                let mut matched_fields = filter.matches(document)?;

                let Some(query) = query.as_deref() else {
                    return Some(SearchResult {
                        document: document.clone(),
                        score: 0.0,
                        highlights: Vec::new(),
                        matched_fields,
                    });
                };

                let (score, fields) = self.score(document, query);
                if fields.is_empty() {
                    return None;
                }
                matched_fields.extend(fields);

                Some(SearchResult {
                    document: document.clone(),
                    score,
                    highlights: self.highlights(&document.content, query),
                    matched_fields,
                })
            })
            .collect()
    }

    /// Score one document against a lowercased query
    pub fn score(&self, document: &Document, query: &str) -> (f32, BTreeSet<MatchedField>) {
        let contains = |text: &str| text.to_lowercase().contains(query);
        let mut score = 0.0;
        let mut fields = BTreeSet::new();

        if contains(&document.title) {
            score += self.config.title_weight;
            fields.insert(MatchedField::Title);
        }
        if document.metadata.description.as_deref().is_some_and(contains) {
            score += self.config.description_weight;
            fields.insert(MatchedField::Description);
        }
        if document.metadata.tags.iter().any(|t| contains(t)) {
            score += self.config.tag_weight;
            fields.insert(MatchedField::Tags);
        }
        if document.metadata.keywords.iter().any(|k| contains(k)) {
            score += self.config.keyword_weight;
            fields.insert(MatchedField::Keywords);
        }
        if contains(&document.content) {
            score += self.config.content_weight;
            fields.insert(MatchedField::Content);
        }

        (score, fields)
    }

    /// Up to `max_highlights` content sentences containing the query
    pub fn highlights(&self, content: &str, query: &str) -> Vec<String> {
        content
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty() && s.to_lowercase().contains(query))
            .take(self.config.max_highlights)
            .map(|s| {
                let excerpt: String = s.chars().take(self.config.highlight_length).collect();
                format!("{}...", excerpt)
            })
            .collect()
    }
}

/// Order results by score, highest first, keeping ties in input order
pub fn rank_by_score(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}
