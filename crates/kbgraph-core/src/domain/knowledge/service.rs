//! Knowledge graph service
//!
//! Entry point for presentation code. Each operation reads a fresh snapshot
//! from the document store; nothing is cached between calls.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::document::DocumentStore;
use crate::domain::graph::{GraphBuilder, GraphStats, KnowledgeGraph, Position};
use crate::domain::interaction::InteractionState;
use crate::domain::layout::{Canvas, ForceLayout};
use crate::domain::search::{
    RelatedDocument, RelevanceEngine, SearchFilters, SearchResult, SimilarityEngine, rank_by_score,
};
use crate::error::{Error, Result};

/// Graph statistics plus per-category and per-tag document counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeStats {
    #[serde(flatten)]
    pub graph: GraphStats,
    pub nodes: usize,
    pub edges: usize,
    /// Documents per non-empty category
    pub by_category: BTreeMap<String, usize>,
    /// Documents per tag
    pub by_tag: BTreeMap<String, usize>,
    /// Explicit relationships whose endpoints both exist
    pub relationships: usize,
}

/// Knowledge graph service over a document store
///
/// Provides:
/// - Graph building and layout
/// - Relevance search
/// - Related-document recommendations
/// - Collection statistics
pub struct KnowledgeGraphService<S: DocumentStore> {
    store: Arc<S>,
    config: Config,
}

impl<S: DocumentStore> KnowledgeGraphService<S> {
    /// Create a service with default configuration
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Build the graph from the current store snapshot
    pub async fn build_graph(&self) -> Result<KnowledgeGraph> {
        let documents = self.store.list_documents().await?;
        let graph = GraphBuilder::new().build(&documents);

        info!(
            documents = documents.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built knowledge graph"
        );

        Ok(graph)
    }

    /// Build the graph and lay it out on `canvas`
    ///
    /// `prior` carries positions from an earlier layout so nodes that survive
    /// a rebuild do not jump. A `seed` makes the initial placement reproducible.
    pub async fn build_layout(
        &self,
        canvas: &Canvas,
        prior: &HashMap<String, Position>,
        seed: Option<u64>,
    ) -> Result<KnowledgeGraph> {
        let mut graph = self.build_graph().await?;
        self.relayout(&mut graph, canvas, prior, seed);
        Ok(graph)
    }

    /// Rebuild and lay out the graph while the user is interacting with it
    ///
    /// A fresh graph carries no pins, so the pins held by `interaction` are
    /// re-applied before the simulator runs.
    pub async fn rebuild_layout(
        &self,
        canvas: &Canvas,
        prior: &HashMap<String, Position>,
        interaction: &mut InteractionState,
        seed: Option<u64>,
    ) -> Result<KnowledgeGraph> {
        let mut graph = self.build_graph().await?;
        if interaction.apply_pins(&mut graph) {
            debug!(node_id = ?interaction.dragged_node(), "Restored drag pin after rebuild");
        }
        self.relayout(&mut graph, canvas, prior, seed);
        Ok(graph)
    }

    /// Re-run the layout on an existing graph (e.g. after a canvas resize)
    pub fn relayout(
        &self,
        graph: &mut KnowledgeGraph,
        canvas: &Canvas,
        prior: &HashMap<String, Position>,
        seed: Option<u64>,
    ) {
        let layout_config = self.config.layout.clone();
        let mut layout = match seed {
            Some(seed) => ForceLayout::with_seed(layout_config, seed),
            None => ForceLayout::new(layout_config),
        };
        layout.run(graph, canvas, prior);

        info!(
            nodes = graph.node_count(),
            width = canvas.width,
            height = canvas.height,
            "Laid out knowledge graph"
        );
    }

    /// Search the collection; results are ranked by score, highest first
    pub async fn search(
        &self,
        filters: &SearchFilters,
        limit: Option<usize>,
    ) -> Result<Vec<SearchResult>> {
        let documents = self.store.list_documents().await?;
        let engine = RelevanceEngine::new(self.config.search.clone());

        let mut results = engine.search(&documents, filters);
        rank_by_score(&mut results);
        if let Some(limit) = limit {
            results.truncate(limit);
        }

        debug!(
            query = ?filters.query,
            candidates = documents.len(),
            results = results.len(),
            "Search complete"
        );

        Ok(results)
    }

    /// Documents most similar to `id`, excluding `id` itself
    pub async fn find_related(&self, id: &str, limit: usize) -> Result<Vec<RelatedDocument>> {
        let reference = self
            .store
            .get_document(id)
            .await?
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))?;
        let candidates = self.store.list_documents().await?;

        let related = SimilarityEngine::new(self.config.similarity.clone()).rank(
            &reference,
            &candidates,
            limit,
        );

        debug!(
            document_id = %id,
            candidates = candidates.len(),
            results = related.len(),
            "Related documents ranked"
        );

        Ok(related)
    }

    /// Collection statistics
    pub async fn stats(&self) -> Result<KnowledgeStats> {
        let documents = self.store.list_documents().await?;
        let graph = GraphBuilder::new().build(&documents);

        let mut by_category = BTreeMap::new();
        let mut by_tag = BTreeMap::new();
        for document in &documents {
            if let Some(category) = document.category() {
                *by_category.entry(category.to_string()).or_insert(0) += 1;
            }
            for tag in document.graph_tags() {
                *by_tag.entry(tag.to_string()).or_insert(0) += 1;
            }
        }

        let structural = by_category.values().sum::<usize>() + by_tag.values().sum::<usize>();

        Ok(KnowledgeStats {
            graph: graph.stats().clone(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            relationships: graph.edge_count().saturating_sub(structural),
            by_category,
            by_tag,
        })
    }
}
