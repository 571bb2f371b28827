//! Scrape configuration: which pages to fetch, how to read them, where to cache.
//!
//! Loaded from an optional YAML file. Every field has a default, so an empty
//! file (or no file at all) scrapes the NOS domestic and foreign news pages.
//!
//! ```yaml
//! source_url: https://teletekst-data.nos.nl/json/
//! cache_key: news-items
//! categories:
//!   - name: binnenland
//!     pages: [104, 105, 106]
//!   - name: buitenland
//!     pages: [125, 126]
//! ```

use crate::error::Result;
use crate::models::PageSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// One category label and its page numbers, in scrape order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub name: String,
    pub pages: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Base URL; the page number is appended as the last path segment.
    pub source_url: String,
    /// Cache key the aggregated items are stored under.
    pub cache_key: String,
    /// Selector for the title-coloured text of a page.
    pub title_selector: String,
    /// Selector for the body-coloured text of a page.
    pub body_selector: String,
    pub request_timeout_secs: u64,
    /// Categories in presentation order. A list keeps YAML order intact.
    pub categories: Vec<Category>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: "https://teletekst-data.nos.nl/json/".to_string(),
            cache_key: "news-items".to_string(),
            title_selector: "span.yellow.bg-blue".to_string(),
            body_selector: "span.cyan".to_string(),
            request_timeout_secs: 30,
            categories: vec![
                Category {
                    name: "binnenland".to_string(),
                    pages: (104..=111).collect(),
                },
                Category {
                    name: "buitenland".to_string(),
                    pages: (125..=132).collect(),
                },
            ],
        }
    }
}

impl Config {
    /// Load from `path`, or fall back to defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&raw)?;
        info!(
            path = %path.display(),
            categories = config.categories.len(),
            pages = config.page_count(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Flatten categories into page specs, category order first, then page order.
    pub fn page_specs(&self) -> Vec<PageSpec> {
        self.categories
            .iter()
            .flat_map(|category| {
                category.pages.iter().map(|&page| PageSpec {
                    page,
                    category: category.name.clone(),
                })
            })
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.categories.iter().map(|c| c.pages.len()).sum()
    }
}
