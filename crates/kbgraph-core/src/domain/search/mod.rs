//! Search domain module
//!
//! Relevance search and related-document recommendations over a document
//! snapshot.
//!
//! - **SearchFilters**: free-text query plus structural allow-lists
//! - **DocumentFilter**: structural filters as composable specifications
//! - **RelevanceEngine**: weighted substring scoring with highlights
//! - **SimilarityEngine**: pairwise similarity and top-N ranking

mod filters;
mod relevance;
mod similarity;
mod specification;

pub use filters::{DateRange, SearchFilters};
pub use relevance::{MatchedField, RelevanceEngine, SearchResult, rank_by_score};
pub use similarity::{RelatedDocument, SimilarityEngine};
pub use specification::{
    AuthorSpec, CategorySpec, ComplexitySpec, CreatedWithinSpec, DocumentFilter, TagSpec,
};
