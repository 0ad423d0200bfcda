//! CLI tests

use chrono::{Datelike, Timelike};
use clap::Parser;

use crate::{Cli, Commands, ConfigAction, DocsAction, OutputFormat, build_filters, parse_date};
use kbgraph_core::domain::document::Complexity;

#[test]
fn test_global_flags() {
    let cli = Cli::try_parse_from(["kbgraph", "stats", "--format", "json", "-q", "--docs", "d.json"])
        .unwrap();
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(cli.quiet);
    assert_eq!(cli.docs.as_deref(), Some(std::path::Path::new("d.json")));
    assert!(matches!(cli.command, Commands::Stats));
}

#[test]
fn test_search_arguments() {
    let cli = Cli::try_parse_from([
        "kbgraph",
        "search",
        "secur",
        "--category",
        "security",
        "--tag",
        "x",
        "--tag",
        "y",
        "--limit",
        "2",
    ])
    .unwrap();

    match cli.command {
        Commands::Search {
            query,
            categories,
            tags,
            limit,
            ..
        } => {
            assert_eq!(query.as_deref(), Some("secur"));
            assert_eq!(categories, vec!["security"]);
            assert_eq!(tags, vec!["x", "y"]);
            assert_eq!(limit, Some(2));
        }
        _ => panic!("expected search command"),
    }
}

#[test]
fn test_related_default_limit() {
    let cli = Cli::try_parse_from(["kbgraph", "related", "A"]).unwrap();
    assert!(matches!(cli.command, Commands::Related { ref id, limit: 5 } if id == "A"));
}

#[test]
fn test_subcommand_actions() {
    let cli = Cli::try_parse_from(["kbgraph", "docs", "show", "A"]).unwrap();
    assert!(matches!(cli.command, Commands::Docs { action: DocsAction::Show { .. } }));

    let cli = Cli::try_parse_from(["kbgraph", "config", "set", "layout.margin", "20"]).unwrap();
    assert!(matches!(cli.command, Commands::Config { action: ConfigAction::Set { .. } }));

    assert!(Cli::try_parse_from(["kbgraph", "frobnicate"]).is_err());
}

#[test]
fn test_parse_date() {
    let start = parse_date("2024-03-05", false).unwrap();
    assert_eq!((start.year(), start.month(), start.day(), start.hour()), (2024, 3, 5, 0));

    let end = parse_date("2024-03-05", true).unwrap();
    assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));

    let exact = parse_date("2024-03-05T10:30:00+02:00", false).unwrap();
    assert_eq!(exact.hour(), 8);

    let err = parse_date("yesterday", false).unwrap_err();
    assert_eq!(err.code(), "E800");
}

#[test]
fn test_build_filters() {
    let filters = build_filters(
        Some("auth".into()),
        vec!["security".into()],
        Vec::new(),
        &["Advanced".to_string()],
        Vec::new(),
        Some("2024-01-01"),
        None,
    )
    .unwrap();

    assert_eq!(filters.normalized_query().as_deref(), Some("auth"));
    assert_eq!(filters.complexities, vec![Complexity::Advanced]);
    assert!(filters.created.is_some());

    let err = build_filters(None, Vec::new(), Vec::new(), &["guru".into()], Vec::new(), None, None)
        .unwrap_err();
    assert!(err.to_string().contains("guru"));
}
