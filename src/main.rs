//! # Teletext News
//!
//! Scrapes NOS Teletekst news pages, rebuilds readable headlines and stories
//! from the fragmented teletext markup, and caches them for an HTML digest.
//!
//! ## Usage
//!
//! ```sh
//! teletext_news scrape
//! teletext_news render -o news.html
//! ```
//!
//! ## Architecture
//!
//! 1. **Scrape**: fetch each configured page in order, extract title and body
//!    text by span colour, normalize it, and store all items under one cache key
//! 2. **Render**: read the cached items back and produce an HTML page grouped
//!    by category
//!
//! Pages that fail are logged and skipped; the scrape always stores whatever
//! it managed to collect.

use chrono::{Datelike, Local};
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cache;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod scanner;
mod scrapers;
mod text;
mod utils;

use cache::{FileCache, store_items};
use cli::{Cli, Command};
use config::Config;
use outputs::html::{Display, display};
use scrapers::teletext::{HttpPageSource, PageExtractor};
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = Config::load(args.config.as_deref())?;
    let cache = FileCache::new(&args.cache_dir);

    match args.command {
        Command::Scrape => {
            scrape(&config, &cache, &args.cache_dir).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Render { output } => render(&config, &cache, output.as_deref()).await,
    }
}

/// Run one full scrape and store the result.
#[instrument(level = "info", skip_all)]
async fn scrape(config: &Config, cache: &FileCache, cache_dir: &str) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();

    if let Err(e) = ensure_writable_dir(cache_dir).await {
        error!(
            path = %cache_dir,
            error = %e,
            "Cache directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let source = HttpPageSource::from_config(config)?;
    let extractor = PageExtractor::from_config(source, config);
    let specs = config.page_specs();
    info!(pages = specs.len(), categories = config.categories.len(), "Starting scrape");

    let aggregation = aggregate::aggregate(&extractor, &specs).await;
    for failure in &aggregation.failures {
        debug!(
            page = failure.page,
            category = %failure.category,
            error = %failure.error,
            "Skipped page this run"
        );
    }

    store_items(cache, &config.cache_key, &aggregation.items).await?;
    info!("Stored {} news items.", aggregation.items.len());

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        stored = aggregation.items.len(),
        failed = aggregation.failures.len(),
        "Scrape complete"
    );
    Ok(())
}

/// Render the cached items to `output`, or stdout when no file is given.
///
/// Fails with [`ExitCode::FAILURE`] when the cache holds no items.
#[instrument(level = "info", skip_all)]
async fn render(
    config: &Config,
    cache: &FileCache,
    output: Option<&std::path::Path>,
) -> Result<ExitCode, Box<dyn Error>> {
    let year = Local::now().year();
    let html = match display(cache, &config.cache_key, year).await? {
        Display::Page(html) => html,
        Display::NoData => {
            eprintln!("No news items found");
            return Ok(ExitCode::FAILURE);
        }
    };

    match output {
        Some(path) => {
            tokio::fs::write(path, html).await?;
            info!(path = %path.display(), "Wrote HTML page");
        }
        None => println!("{html}"),
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsItem;

    #[tokio::test]
    async fn test_render_empty_cache_exits_with_failure() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        let output = dir.path().join("news.html");

        let code = render(&Config::default(), &cache, Some(output.as_path())).await.unwrap();
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_render_writes_page_and_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        let config = Config::default();
        let items = vec![NewsItem {
            title: "Kabinet valt".to_string(),
            text: "Het kabinet is gevallen.".to_string(),
            category: "binnenland".to_string(),
        }];
        store_items(&cache, &config.cache_key, &items).await.unwrap();
        let output = dir.path().join("news.html");

        let code = render(&config, &cache, Some(output.as_path())).await.unwrap();
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::SUCCESS));
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("Kabinet valt"));
    }
}
