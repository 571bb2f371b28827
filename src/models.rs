//! Data models for teletext pages and the news items extracted from them.
//!
//! - [`TeletextPage`]: the raw JSON document served per page number
//! - [`PageSpec`]: one configured page and the category it belongs to
//! - [`NewsItem`]: a reconstructed title/body pair, the unit that gets cached
//! - [`Aggregation`]: the outcome of one full scrape run

use serde::{Deserialize, Serialize};

/// The JSON document returned by the teletext service for one page.
///
/// Only `content` is used; it holds the page as an HTML fragment in which
/// colour classes on `<span>` elements mark titles and body text.
#[derive(Debug, Deserialize)]
pub struct TeletextPage {
    pub content: String,
}

/// A page number to scrape and the category label attached to its item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub page: u32,
    pub category: String,
}

/// A news item extracted from one teletext page.
///
/// `title` and `text` are always the reconstructed strings, never raw
/// fragments. This is also the record shape stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub text: String,
    pub category: String,
}

/// A page that could not be turned into a [`NewsItem`] during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub page: u32,
    pub category: String,
    pub error: String,
}

/// Everything one scrape run produced.
///
/// `items` follows configuration order (category, then page). Failed pages
/// leave no entry in `items`; they are listed in `failures` instead.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub items: Vec<NewsItem>,
    pub failures: Vec<PageFailure>,
}
