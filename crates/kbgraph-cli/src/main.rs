//! kbgraph CLI - inspect, search and lay out a knowledge base

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use kbgraph_core::config::Config;
use kbgraph_core::domain::document::{Complexity, DocumentStore};
use kbgraph_core::domain::knowledge::KnowledgeGraphService;
use kbgraph_core::domain::layout::Canvas;
use kbgraph_core::domain::search::SearchFilters;
use kbgraph_core::infrastructure::document::JsonFileDocumentStore;
use kbgraph_core::Error;
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(name = "kbgraph")]
#[command(author, version, about = "Knowledge base graph explorer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Documents file (defaults to `store.documents_path`)
    #[arg(long, global = true)]
    docs: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and lay out the knowledge graph
    Graph {
        /// Canvas width (defaults to `layout.width`)
        #[arg(long)]
        width: Option<f32>,
        /// Canvas height (defaults to `layout.height`)
        #[arg(long)]
        height: Option<f32>,
        /// Seed for reproducible initial placement
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Search documents
    Search {
        /// Free-text query (case-insensitive substring)
        query: Option<String>,
        /// Only documents in these categories
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Only documents carrying any of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Only documents of these complexity levels
        #[arg(long = "complexity")]
        complexities: Vec<String>,
        /// Only documents by these authors
        #[arg(long = "author")]
        authors: Vec<String>,
        /// Created on or after (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        from: Option<String>,
        /// Created on or before (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        to: Option<String>,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show documents related to a document
    Related {
        /// Reference document ID
        id: String,
        /// Maximum number of results
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Collection statistics
    Stats,

    /// Manage documents
    Docs {
        #[command(subcommand)]
        action: DocsAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum DocsAction {
    /// List all documents
    List,
    /// Show document details
    Show { id: String },
    /// Delete a document
    Delete { id: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kbgraph=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        report_error(&err);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Graph {
            width,
            height,
            seed,
        } => {
            let service = open_service(cli.docs)?;
            cmd_graph(&service, width, height, seed, format, quiet).await
        }

        Commands::Search {
            query,
            categories,
            tags,
            complexities,
            authors,
            from,
            to,
            limit,
        } => {
            let filters = build_filters(
                query,
                categories,
                tags,
                &complexities,
                authors,
                from.as_deref(),
                to.as_deref(),
            )?;
            let service = open_service(cli.docs)?;
            cmd_search(&service, &filters, limit, format, quiet).await
        }

        Commands::Related { id, limit } => {
            let service = open_service(cli.docs)?;
            cmd_related(&service, &id, limit, format, quiet).await
        }

        Commands::Stats => cmd_stats(&open_service(cli.docs)?, format).await,

        Commands::Docs { action } => {
            let service = open_service(cli.docs)?;
            cmd_docs(service.store().as_ref(), action, format, quiet).await
        }

        Commands::Config { action } => cmd_config(action, quiet),
    }
}

/// Service over the documents file named by `--docs` or the configuration
fn open_service(
    docs: Option<PathBuf>,
) -> anyhow::Result<KnowledgeGraphService<JsonFileDocumentStore>> {
    let config = Config::load()?;
    let docs_path = match docs {
        Some(path) => path,
        None => config.store.resolved_documents_path()?,
    };
    debug!(path = %docs_path.display(), "Using documents file");

    let store = Arc::new(JsonFileDocumentStore::new(docs_path));
    Ok(KnowledgeGraphService::new(store).with_config(config))
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<Error>() {
        Some(core) => {
            eprintln!("Error [{}]: {}", core.code(), core);
            if let Some(suggestion) = core.suggestion() {
                eprintln!("  Try: {}", suggestion);
            }
        }
        None => eprintln!("Error: {:#}", err),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ============================================================================
// Argument Parsing
// ============================================================================

fn build_filters(
    query: Option<String>,
    categories: Vec<String>,
    tags: Vec<String>,
    complexities: &[String],
    authors: Vec<String>,
    from: Option<&str>,
    to: Option<&str>,
) -> anyhow::Result<SearchFilters> {
    let complexities = complexities
        .iter()
        .map(|c| {
            Complexity::parse(c).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "unknown complexity '{}' (expected beginner, intermediate, advanced or expert)",
                    c
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let from = from.map(|s| parse_date(s, false)).transpose()?;
    let to = to.map(|s| parse_date(s, true)).transpose()?;

    let mut filters = SearchFilters::new()
        .with_categories(categories)
        .with_tags(tags)
        .with_complexities(complexities)
        .with_authors(authors)
        .created_between(from, to);
    filters.query = query;
    Ok(filters)
}

/// Parse `YYYY-MM-DD` (start or end of day, UTC) or an RFC 3339 timestamp
fn parse_date(value: &str, end_of_day: bool) -> Result<DateTime<Utc>, Error> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| Error::InvalidInput(format!("invalid date '{}'", value)))?;
    let time = if end_of_day {
        date.and_hms_milli_opt(23, 59, 59, 999)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    time.map(|t| t.and_utc())
        .ok_or_else(|| Error::InvalidInput(format!("invalid date '{}'", value)))
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn cmd_graph(
    service: &KnowledgeGraphService<JsonFileDocumentStore>,
    width: Option<f32>,
    height: Option<f32>,
    seed: Option<u64>,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let layout = &service.config().layout;
    let canvas = Canvas::new(
        width.unwrap_or(layout.width),
        height.unwrap_or(layout.height),
        layout.margin,
    );
    let graph = service.build_layout(&canvas, &HashMap::new(), seed).await?;

    if format == OutputFormat::Json {
        return print_json(&graph);
    }

    let stats = graph.stats();
    println!(
        "Graph: {} nodes, {} edges ({} documents, {} categories, {} tags)",
        graph.node_count(),
        graph.edge_count(),
        stats.document_count,
        stats.categories,
        stats.tags
    );
    if quiet {
        return Ok(());
    }

    if !graph.is_empty() {
        println!("\nNodes:");
        for node in graph.nodes() {
            println!(
                "  [{}] {} \"{}\" at ({:.1}, {:.1})",
                node.kind, node.id, node.label, node.position.x, node.position.y
            );
        }
    }
    if graph.edge_count() > 0 {
        println!("\nEdges:");
        for edge in graph.edges() {
            println!(
                "  {} --{}--> {} ({:.2})",
                edge.source_node_id, edge.edge_type, edge.target_node_id, edge.weight
            );
        }
    }
    Ok(())
}

async fn cmd_search(
    service: &KnowledgeGraphService<JsonFileDocumentStore>,
    filters: &SearchFilters,
    limit: Option<usize>,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let results = service.search(filters, limit).await?;

    if format == OutputFormat::Json {
        return print_json(&results);
    }

    if results.is_empty() {
        if !quiet {
            println!("No matching documents.");
        }
        return Ok(());
    }

    for result in &results {
        println!(
            "{:>6.1}  {}  {}",
            result.score, result.document.id, result.document.title
        );
        if quiet {
            continue;
        }
        if !result.matched_fields.is_empty() {
            let fields: Vec<_> = result.matched_fields.iter().map(|f| f.as_str()).collect();
            println!("        matched: {}", fields.join(", "));
        }
        for highlight in &result.highlights {
            println!("        > {}", highlight);
        }
    }
    Ok(())
}

async fn cmd_related(
    service: &KnowledgeGraphService<JsonFileDocumentStore>,
    id: &str,
    limit: usize,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let related = service.find_related(id, limit).await?;

    if format == OutputFormat::Json {
        return print_json(&related);
    }

    if related.is_empty() {
        if !quiet {
            println!("No related documents.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Related to '{}':", id);
    }
    for item in &related {
        println!(
            "{:>6.1}  {}  {}",
            item.score, item.document.id, item.document.title
        );
    }
    Ok(())
}

async fn cmd_stats(
    service: &KnowledgeGraphService<JsonFileDocumentStore>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let stats = service.stats().await?;

    if format == OutputFormat::Json {
        return print_json(&stats);
    }

    println!("Documents:     {}", stats.graph.document_count);
    println!("Categories:    {}", stats.graph.categories);
    println!("Tags:          {}", stats.graph.tags);
    println!("Nodes:         {}", stats.nodes);
    println!("Edges:         {}", stats.edges);
    println!("Relationships: {}", stats.relationships);

    if !stats.by_category.is_empty() {
        println!("\nBy category:");
        for (category, count) in &stats.by_category {
            println!("  {:<20} {}", category, count);
        }
    }
    if !stats.by_tag.is_empty() {
        println!("\nBy tag:");
        for (tag, count) in &stats.by_tag {
            println!("  {:<20} {}", tag, count);
        }
    }
    Ok(())
}

async fn cmd_docs(
    store: &JsonFileDocumentStore,
    action: DocsAction,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    match action {
        DocsAction::List => {
            let documents = store.list_documents().await?;
            if format == OutputFormat::Json {
                return print_json(&documents);
            }
            if documents.is_empty() {
                if !quiet {
                    println!("No documents found in {}.", store.path().display());
                }
                return Ok(());
            }
            for d in &documents {
                match d.category() {
                    Some(category) => println!("{}  {}  [{}]", d.id, d.title, category),
                    None => println!("{}  {}", d.id, d.title),
                }
            }
        }
        DocsAction::Show { id } => {
            let document = store
                .get_document(&id)
                .await?
                .ok_or_else(|| Error::DocumentNotFound(id.clone()))?;
            if format == OutputFormat::Json {
                return print_json(&document);
            }
            println!("{}", document.title);
            println!("  ID: {}", document.id);
            if let Some(category) = document.category() {
                println!("  Category: {}", category);
            }
            if !document.metadata.tags.is_empty() {
                let tags: Vec<_> = document.metadata.tags.iter().map(String::as_str).collect();
                println!("  Tags: {}", tags.join(", "));
            }
            if let Some(complexity) = document.metadata.complexity {
                println!("  Complexity: {}", complexity);
            }
            if let Some(author) = document.author() {
                println!("  Author: {}", author);
            }
            println!("  Created: {}", document.created_at.format("%Y-%m-%d %H:%M:%S"));
            println!("  Updated: {}", document.updated_at.format("%Y-%m-%d %H:%M:%S"));
            for relationship in &document.relationships {
                println!(
                    "  -> {} ({}, {:.2})",
                    relationship.target_id,
                    relationship.relationship_type,
                    relationship.effective_weight()
                );
            }
            if !quiet && !document.content.is_empty() {
                println!("\n{}", document.content);
            }
        }
        DocsAction::Delete { id } => {
            if !store.delete_document(&id).await? {
                return Err(Error::DocumentNotFound(id).into());
            }
            if !quiet {
                println!("Deleted document '{}'.", id);
            }
        }
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod main_tests;
