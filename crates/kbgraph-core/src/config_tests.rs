//! Config module tests

use std::path::PathBuf;

use crate::config::{Config, LayoutConfig, SearchConfig, SimilarityConfig};
use crate::error::Error;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.layout.width, 1200.0);
    assert_eq!(config.layout.height, 800.0);
    assert_eq!(config.layout.margin, 50.0);
    assert_eq!(config.layout.iterations, 100);
    assert_eq!(config.layout.alpha, 1.0);

    assert_eq!(config.search.title_weight, 10.0);
    assert_eq!(config.search.description_weight, 5.0);
    assert_eq!(config.search.tag_weight, 3.0);
    assert_eq!(config.search.keyword_weight, 2.0);
    assert_eq!(config.search.content_weight, 1.0);
    assert_eq!(config.search.max_highlights, 3);
    assert_eq!(config.search.highlight_length, 150);

    assert_eq!(config.similarity.category_weight, 5.0);
    assert_eq!(config.similarity.tag_weight, 3.0);
    assert_eq!(config.similarity.keyword_weight, 2.0);
    assert_eq!(config.similarity.topic_weight, 2.0);
    assert_eq!(config.similarity.complexity_weight, 1.0);

    assert!(config.store.documents_path.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_get_and_set() {
    let mut config = Config::default();

    config.set("layout.iterations", "250").unwrap();
    assert_eq!(config.get("layout.iterations").unwrap(), "250");

    config.set("layout.margin", "20").unwrap();
    assert_eq!(config.layout.margin, 20.0);

    config.set("similarity.tag_weight", "1.5").unwrap();
    assert_eq!(config.similarity.tag_weight, 1.5);

    config.set("store.documents_path", "/tmp/docs.json").unwrap();
    assert_eq!(
        config.store.documents_path,
        Some(PathBuf::from("/tmp/docs.json"))
    );
    assert_eq!(config.get("store.documents_path").unwrap(), "/tmp/docs.json");
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let mut config = Config::default();

    assert!(config.set("layout.iterations", "0").is_err());
    assert!(config.set("layout.iterations", "many").is_err());
    assert!(config.set("layout.width", "0").is_err());
    assert!(config.set("layout.margin", "-1").is_err());
    assert!(config.set("search.title_weight", "NaN").is_err());
    assert!(config.set("no.such.key", "1").is_err());
    assert!(config.get("no.such.key").is_err());

    assert_eq!(config.layout.iterations, 100);
    assert_eq!(config.layout.margin, 50.0);
}

#[test]
fn test_config_validate() {
    let mut config = Config::default();
    config.layout.iterations = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.search.content_weight = -1.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.layout.height = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_list_covers_every_section() {
    let mut config = Config::default();
    config.store.documents_path = Some(PathBuf::from("docs.json"));

    let entries = config.list().unwrap();
    assert!(entries.iter().any(|(k, _)| k == "layout.repulsion"));
    assert!(entries.iter().any(|(k, _)| k == "search.highlight_length"));
    assert!(entries.iter().any(|(k, _)| k == "similarity.complexity_weight"));
    assert!(entries.iter().any(|(k, v)| k == "store.documents_path" && v == "docs.json"));
}

#[test]
fn test_config_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.layout.iterations = 42;
    config.search.max_highlights = 1;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.layout.iterations, 42);
    assert_eq!(loaded.search.max_highlights, 1);
    assert_eq!(loaded.similarity.category_weight, 5.0);
}

#[test]
fn test_config_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.layout.iterations, 100);
}

#[test]
fn test_config_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[layout]\nmargin = 10.0\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.layout.margin, 10.0);
    assert_eq!(config.layout.width, 1200.0);
    assert_eq!(config.search.title_weight, 10.0);
}

#[test]
fn test_config_invalid_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[layout]\niterations = 0\n").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_section_defaults_match_config_defaults() {
    let config = Config::default();
    assert_eq!(LayoutConfig::default().repulsion, config.layout.repulsion);
    assert_eq!(SearchConfig::default().tag_weight, config.search.tag_weight);
    assert_eq!(
        SimilarityConfig::default().topic_weight,
        config.similarity.topic_weight
    );
}

#[test]
fn test_config_validate_rejects_non_finite_values() {
    let mut config = Config::default();
    config.layout.repulsion = f32::NAN;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.similarity.tag_weight = f32::INFINITY;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.layout.margin = f32::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_file_with_nan_or_inf_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    std::fs::write(&path, "[layout]\nalpha = nan\n").unwrap();
    assert!(Config::load_from(&path).is_err());

    std::fs::write(&path, "[search]\ntitle_weight = inf\n").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_config_failures_carry_config_error_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[layout\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    let core = err.downcast_ref::<Error>().expect("config error");
    assert_eq!(core.code(), "E600");

    let mut config = Config::default();
    let err = config.set("layout.iterations", "many").unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::ConfigError(_))));

    let err = config.get("no.such.key").unwrap_err();
    assert_eq!(
        err.downcast_ref::<Error>().and_then(Error::suggestion),
        Some("kbgraph config list".to_string())
    );
}
