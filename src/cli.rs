//! Command-line interface definitions for Teletext News.
//!
//! All global options can also be provided through environment variables.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the Teletext News application.
///
/// # Examples
///
/// ```sh
/// # Scrape the configured pages into ./cache
/// teletext_news scrape
///
/// # Render the cached items to a file
/// teletext_news -d /var/cache/teletext render -o news.html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "TELETEXT_NEWS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the cached news items
    #[arg(short = 'd', long, env = "TELETEXT_NEWS_CACHE_DIR", default_value = "./cache")]
    pub cache_dir: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Fetch every configured page and store the extracted items
    Scrape,
    /// Render the cached items as an HTML page
    Render {
        /// Write the page to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
