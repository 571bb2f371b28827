//! NOS Teletekst page scraper.
//!
//! Pages are served as JSON by `https://teletekst-data.nos.nl/json/{page}`.
//! The `content` field holds the rendered page as HTML, with the teletext
//! colours expressed as span classes: yellow on blue for the headline, cyan
//! for the story text.

use crate::config::Config;
use crate::error::{NewsError, Result};
use crate::models::{NewsItem, TeletextPage};
use crate::scanner::MarkupScanner;
use crate::text::{FragmentCollector, reconstruct};
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

const USER_AGENT: &str = concat!("teletext_news/", env!("CARGO_PKG_VERSION"));

/// Anything that can produce the raw HTML of a teletext page.
pub trait PageSource {
    /// Fetch the HTML content of `page`.
    ///
    /// Fails with [`NewsError::PageNotFound`] when the service does not have it.
    async fn fetch(&self, page: u32) -> Result<String>;
}

/// [`PageSource`] backed by the public teletext JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    base_url: Url,
}

impl HttpPageSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // Url::join replaces the last segment unless the base ends in '/'.
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.source_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn page_url(&self, page: u32) -> Result<Url> {
        Ok(self.base_url.join(&page.to_string())?)
    }
}

impl PageSource for HttpPageSource {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, page: u32) -> Result<String> {
        let url = self.page_url(page)?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Teletext page unavailable");
            return Err(NewsError::PageNotFound {
                page,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: TeletextPage = serde_json::from_str(&body)?;
        debug!(%url, bytes = parsed.content.len(), "Fetched teletext page");
        Ok(parsed.content)
    }
}

/// Turns one teletext page into a [`NewsItem`].
#[derive(Debug)]
pub struct PageExtractor<S> {
    source: S,
    title_selector: String,
    body_selector: String,
}

impl<S: PageSource> PageExtractor<S> {
    pub fn new(source: S, title_selector: &str, body_selector: &str) -> Self {
        Self {
            source,
            title_selector: title_selector.to_string(),
            body_selector: body_selector.to_string(),
        }
    }

    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(source, &config.title_selector, &config.body_selector)
    }

    /// Fetch `page`, collect its title and body fragments in one scan, and
    /// reconstruct both into a [`NewsItem`] labelled `category`.
    ///
    /// Fetch and selector errors are returned as-is; there is no retry here.
    #[instrument(level = "info", skip(self))]
    pub async fn extract(&self, page: u32, category: &str) -> Result<NewsItem> {
        let html = self.source.fetch(page).await?;

        let mut titles = FragmentCollector::new();
        let mut bodies = FragmentCollector::new();
        MarkupScanner::new()
            .on(&self.title_selector, |text| titles.push(text))?
            .on(&self.body_selector, |text| bodies.push(text))?
            .run(&html);

        debug!(
            title_fragments = titles.fragments().len(),
            body_fragments = bodies.fragments().len(),
            "Collected fragments"
        );

        let item = NewsItem {
            title: reconstruct(titles.into_fragments()),
            text: reconstruct(bodies.into_fragments()),
            category: category.to_string(),
        };
        info!(title = %item.title, preview = %truncate_for_log(&item.text, 80), "Extracted page");
        Ok(item)
    }
}
