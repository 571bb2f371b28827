//! Key-value cache holding the serialized result of the last scrape run.
//!
//! [`FileCache`] keeps one JSON file per key:
//!
//! ```text
//! cache_dir/
//! └── news-items.json
//! ```

use crate::error::{NewsError, Result};
use crate::models::NewsItem;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, instrument};

pub trait CacheStore {
    /// Read the value stored under `key`, or `None` if nothing was stored yet.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<()>;
}

/// [`CacheStore`] backed by a directory of `<key>.json` files.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Keys become file names, so they must stay inside `dir`.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key == ".." || key.contains(['/', '\\']) {
            return Err(NewsError::InvalidCacheKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CacheStore for FileCache {
    #[instrument(level = "debug", skip(self), fields(dir = %self.dir.display()))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)?).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Cache miss");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(level = "info", skip(self, value), fields(dir = %self.dir.display(), bytes = value.len()))]
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let target = self.path_for(key)?;
        fs::create_dir_all(&self.dir).await?;
        // Readers only ever see a complete file.
        let staging = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&staging, value).await?;
        fs::rename(&staging, &target).await?;
        info!(path = %target.display(), "Wrote cache entry");
        Ok(())
    }
}

/// Serialize `items` and store them under `key`.
pub async fn store_items<C: CacheStore>(cache: &C, key: &str, items: &[NewsItem]) -> Result<()> {
    let json = serde_json::to_string(items)?;
    cache.put(key, &json).await
}

/// Load the items stored under `key`. `None` when the key was never written.
pub async fn load_items<C: CacheStore>(cache: &C, key: &str) -> Result<Option<Vec<NewsItem>>> {
    match cache.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}
