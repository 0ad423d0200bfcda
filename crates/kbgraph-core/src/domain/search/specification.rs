//! Search specifications
//!
//! Structural filters expressed as composable specifications over documents.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::document::{Complexity, Document};
use crate::domain::specification::Specification;

use super::filters::{DateRange, SearchFilters};
use super::relevance::MatchedField;

/// Document category is in the allow-list
pub struct CategorySpec {
    allowed: Vec<String>,
}

impl CategorySpec {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }
}

impl Specification<Document> for CategorySpec {
    fn is_satisfied_by(&self, document: &Document) -> bool {
        document
            .category()
            .is_some_and(|c| self.allowed.iter().any(|a| a == c))
    }
}

/// Any document tag is in the allow-list
pub struct TagSpec {
    allowed: Vec<String>,
}

impl TagSpec {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }
}

impl Specification<Document> for TagSpec {
    fn is_satisfied_by(&self, document: &Document) -> bool {
        self.allowed.iter().any(|t| document.metadata.tags.contains(t))
    }
}

/// Document complexity is in the allow-list
pub struct ComplexitySpec {
    allowed: Vec<Complexity>,
}

impl ComplexitySpec {
    pub fn new(allowed: Vec<Complexity>) -> Self {
        Self { allowed }
    }
}

impl Specification<Document> for ComplexitySpec {
    fn is_satisfied_by(&self, document: &Document) -> bool {
        document
            .metadata
            .complexity
            .is_some_and(|c| self.allowed.contains(&c))
    }
}

/// Document author (or owner) is in the allow-list
pub struct AuthorSpec {
    allowed: Vec<String>,
}

impl AuthorSpec {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }
}

impl Specification<Document> for AuthorSpec {
    fn is_satisfied_by(&self, document: &Document) -> bool {
        document
            .author()
            .is_some_and(|a| self.allowed.iter().any(|x| x == a))
    }
}

/// Document was created inside the range
pub struct CreatedWithinSpec {
    range: DateRange,
}

impl CreatedWithinSpec {
    pub fn new(range: DateRange) -> Self {
        Self { range }
    }
}

impl Specification<Document> for CreatedWithinSpec {
    fn is_satisfied_by(&self, document: &Document) -> bool {
        self.range.contains(document.created_at)
    }
}

/// All supplied structural filters, applied together
#[derive(Default)]
pub struct DocumentFilter {
    /// `None` when no filter was supplied
    spec: Option<Arc<dyn Specification<Document>>>,
    matched_fields: BTreeSet<MatchedField>,
}

impl DocumentFilter {
    /// Build from search filters, skipping empty allow-lists
    pub fn from_filters(filters: &SearchFilters) -> Self {
        let mut filter = Self::default();

        if !filters.categories.is_empty() {
            filter.require(
                CategorySpec::new(filters.categories.clone()),
                Some(MatchedField::Category),
            );
        }
        if !filters.tags.is_empty() {
            filter.require(TagSpec::new(filters.tags.clone()), Some(MatchedField::Tags));
        }
        if !filters.complexities.is_empty() {
            filter.require(ComplexitySpec::new(filters.complexities.clone()), None);
        }
        if !filters.authors.is_empty() {
            filter.require(AuthorSpec::new(filters.authors.clone()), Some(MatchedField::Author));
        }
        if let Some(range) = filters.created {
            filter.require(CreatedWithinSpec::new(range), None);
        }

        filter
    }

    /// AND another specification onto the chain
    fn require<S>(&mut self, spec: S, field: Option<MatchedField>)
    where
        S: Specification<Document> + 'static,
    {
        let chained: Arc<dyn Specification<Document>> = match self.spec.take() {
            Some(current) => Arc::new(current.and(spec)),
            None => Arc::new(spec),
        };
        self.spec = Some(chained);
        if let Some(field) = field {
            self.matched_fields.insert(field);
        }
    }

    /// Check a document against every supplied filter
    ///
    /// Returns `None` when any filter rejects the document, otherwise the
    /// fields that satisfied a supplied category, tag or author filter.
    pub fn matches(&self, document: &Document) -> Option<BTreeSet<MatchedField>> {
        match &self.spec {
            Some(spec) if !spec.is_satisfied_by(document) => None,
            _ => Some(self.matched_fields.clone()),
        }
    }

    /// Filter a collection of documents
    pub fn filter<'a>(&self, documents: &'a [Document]) -> Vec<&'a Document> {
        documents
            .iter()
            .filter(|d| self.matches(d).is_some())
            .collect()
    }
}
