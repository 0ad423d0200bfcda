//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// kbgraph configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub search: SearchConfig,
    pub similarity: SimilarityConfig,
    pub store: StoreConfig,
}

/// Force simulation parameters and the default canvas
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub iterations: u32,
    /// Initial cooling factor, decays linearly to zero
    pub alpha: f32,
    pub repulsion: f32,
    pub attraction: f32,
    pub centering: f32,
}

/// Relevance weights and highlight extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub title_weight: f32,
    pub description_weight: f32,
    pub tag_weight: f32,
    pub keyword_weight: f32,
    pub content_weight: f32,
    pub max_highlights: usize,
    /// Characters kept per highlight before the ellipsis
    pub highlight_length: usize,
}

/// Pairwise similarity weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub category_weight: f32,
    pub tag_weight: f32,
    pub keyword_weight: f32,
    pub topic_weight: f32,
    pub complexity_weight: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub documents_path: Option<PathBuf>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            margin: 50.0,
            iterations: 100,
            alpha: 1.0,
            repulsion: 1000.0,
            attraction: 0.01,
            centering: 0.01,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            title_weight: 10.0,
            description_weight: 5.0,
            tag_weight: 3.0,
            keyword_weight: 2.0,
            content_weight: 1.0,
            max_highlights: 3,
            highlight_length: 150,
        }
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            category_weight: 5.0,
            tag_weight: 3.0,
            keyword_weight: 2.0,
            topic_weight: 2.0,
            complexity_weight: 1.0,
        }
    }
}

impl StoreConfig {
    /// Configured documents file, or `<data dir>/kbgraph/documents.json`
    pub fn resolved_documents_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.documents_path {
            return Ok(path.clone());
        }
        Ok(dirs::data_dir()
            .ok_or_else(|| anyhow!("Could not determine data directory"))?
            .join("kbgraph")
            .join("documents.json"))
    }
}

/// Configuration failures carry E600 through `anyhow`
fn config_error(message: impl Into<String>) -> anyhow::Error {
    Error::ConfigError(message.into()).into()
}

const KEYS: &[&str] = &[
    "layout.width",
    "layout.height",
    "layout.margin",
    "layout.iterations",
    "layout.alpha",
    "layout.repulsion",
    "layout.attraction",
    "layout.centering",
    "search.title_weight",
    "search.description_weight",
    "search.tag_weight",
    "search.keyword_weight",
    "search.content_weight",
    "search.max_highlights",
    "search.highlight_length",
    "similarity.category_weight",
    "similarity.tag_weight",
    "similarity.keyword_weight",
    "similarity.topic_weight",
    "similarity.complexity_weight",
    "store.documents_path",
];

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("KBGRAPH_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("kbgraph")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            config_error(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let layout = &self.layout;
        if !(layout.width.is_finite() && layout.height.is_finite())
            || layout.width <= 0.0
            || layout.height <= 0.0
        {
            return Err(config_error("Canvas width and height must be positive"));
        }
        if !layout.margin.is_finite() || layout.margin < 0.0 {
            return Err(config_error("Layout margin must be non-negative"));
        }
        if layout.iterations == 0 {
            return Err(config_error("Layout iterations must be greater than zero"));
        }
        for (name, value) in [
            ("layout.alpha", layout.alpha),
            ("layout.repulsion", layout.repulsion),
            ("layout.attraction", layout.attraction),
            ("layout.centering", layout.centering),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(config_error(format!("{} must be a non-negative number", name)));
            }
        }

        let search = &self.search;
        let similarity = &self.similarity;
        for (name, value) in [
            ("search.title_weight", search.title_weight),
            ("search.description_weight", search.description_weight),
            ("search.tag_weight", search.tag_weight),
            ("search.keyword_weight", search.keyword_weight),
            ("search.content_weight", search.content_weight),
            ("similarity.category_weight", similarity.category_weight),
            ("similarity.tag_weight", similarity.tag_weight),
            ("similarity.keyword_weight", similarity.keyword_weight),
            ("similarity.topic_weight", similarity.topic_weight),
            ("similarity.complexity_weight", similarity.complexity_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(config_error(format!("{} must be a non-negative number", name)));
            }
        }

        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        let value = match key {
            "layout.width" => self.layout.width.to_string(),
            "layout.height" => self.layout.height.to_string(),
            "layout.margin" => self.layout.margin.to_string(),
            "layout.iterations" => self.layout.iterations.to_string(),
            "layout.alpha" => self.layout.alpha.to_string(),
            "layout.repulsion" => self.layout.repulsion.to_string(),
            "layout.attraction" => self.layout.attraction.to_string(),
            "layout.centering" => self.layout.centering.to_string(),

            "search.title_weight" => self.search.title_weight.to_string(),
            "search.description_weight" => self.search.description_weight.to_string(),
            "search.tag_weight" => self.search.tag_weight.to_string(),
            "search.keyword_weight" => self.search.keyword_weight.to_string(),
            "search.content_weight" => self.search.content_weight.to_string(),
            "search.max_highlights" => self.search.max_highlights.to_string(),
            "search.highlight_length" => self.search.highlight_length.to_string(),

            "similarity.category_weight" => self.similarity.category_weight.to_string(),
            "similarity.tag_weight" => self.similarity.tag_weight.to_string(),
            "similarity.keyword_weight" => self.similarity.keyword_weight.to_string(),
            "similarity.topic_weight" => self.similarity.topic_weight.to_string(),
            "similarity.complexity_weight" => self.similarity.complexity_weight.to_string(),

            "store.documents_path" => self
                .store
                .resolved_documents_path()?
                .display()
                .to_string(),

            _ => {
                return Err(config_error(format!(
                    "Unknown configuration key: {}. Use `kbgraph config list` to see available keys.",
                    key
                )));
            }
        };
        Ok(value)
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "layout.iterations" => {
                let iterations: u32 = value
                    .parse()
                    .map_err(|_| config_error(format!("Invalid iterations value: {}", value)))?;
                if iterations == 0 {
                    return Err(config_error("Layout iterations must be greater than zero"));
                }
                self.layout.iterations = iterations;
            }
            "search.max_highlights" => {
                self.search.max_highlights = value
                    .parse()
                    .map_err(|_| config_error(format!("Invalid max_highlights value: {}", value)))?;
            }
            "search.highlight_length" => {
                self.search.highlight_length = value
                    .parse()
                    .map_err(|_| config_error(format!("Invalid highlight_length value: {}", value)))?;
            }
            "store.documents_path" => {
                self.store.documents_path = if value.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => {
                let slot = self.float_slot(key).ok_or_else(|| {
                    config_error(format!(
                        "Unknown configuration key: {}. Use `kbgraph config list` to see available keys.",
                        key
                    ))
                })?;
                let number: f32 = value
                    .parse()
                    .map_err(|_| config_error(format!("Invalid value for {}: {}", key, value)))?;
                if !number.is_finite() || number < 0.0 {
                    return Err(config_error(format!("{} must be a non-negative number", key)));
                }
                if matches!(key, "layout.width" | "layout.height") && number == 0.0 {
                    return Err(config_error(format!("{} must be positive", key)));
                }
                *slot = number;
            }
        }
        Ok(())
    }

    fn float_slot(&mut self, key: &str) -> Option<&mut f32> {
        let slot = match key {
            "layout.width" => &mut self.layout.width,
            "layout.height" => &mut self.layout.height,
            "layout.margin" => &mut self.layout.margin,
            "layout.alpha" => &mut self.layout.alpha,
            "layout.repulsion" => &mut self.layout.repulsion,
            "layout.attraction" => &mut self.layout.attraction,
            "layout.centering" => &mut self.layout.centering,
            "search.title_weight" => &mut self.search.title_weight,
            "search.description_weight" => &mut self.search.description_weight,
            "search.tag_weight" => &mut self.search.tag_weight,
            "search.keyword_weight" => &mut self.search.keyword_weight,
            "search.content_weight" => &mut self.search.content_weight,
            "similarity.category_weight" => &mut self.similarity.category_weight,
            "similarity.tag_weight" => &mut self.similarity.tag_weight,
            "similarity.keyword_weight" => &mut self.similarity.keyword_weight,
            "similarity.topic_weight" => &mut self.similarity.topic_weight,
            "similarity.complexity_weight" => &mut self.similarity.complexity_weight,
            _ => return None,
        };
        Some(slot)
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        KEYS.iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}
