//! Error type shared by the scraping, caching, and rendering layers.

use thiserror::Error;

/// Every failure the pipeline can report.
///
/// Per-page failures ([`NewsError::PageNotFound`], [`NewsError::Http`],
/// [`NewsError::Json`], [`NewsError::Selector`]) are caught by the aggregator
/// and logged; the rest surface from the CLI.
#[derive(Debug, Error)]
pub enum NewsError {
    /// The teletext service answered with a non-success status.
    #[error("page {page} not found (status {status})")]
    PageNotFound { page: u32, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSS selector failed to parse.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("invalid source URL: {0}")]
    Url(#[from] url::ParseError),

    /// A cache key that cannot be used as a file name.
    #[error("invalid cache key `{0}`")]
    InvalidCacheKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, NewsError>;
