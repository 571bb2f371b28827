//! HTML digest of the cached news items.
//!
//! Items are grouped per category (first-seen order), each title toggles the
//! visibility of its story text. The page follows the reader's light or dark
//! colour scheme.

use crate::cache::{CacheStore, load_items};
use crate::error::Result;
use crate::models::NewsItem;
use crate::utils::{escape_html, slugify, upcase};
use std::fmt::Write;
use tracing::{info, instrument, warn};

/// Outcome of a display request.
#[derive(Debug, PartialEq, Eq)]
pub enum Display {
    /// A rendered HTML document.
    Page(String),
    /// The cache is absent or holds no items.
    NoData,
}

const STYLE: &str = r#"
        :root {
            --color-background: #fcfcfa;
            --color-text: #444444;
        }
        @media (prefers-color-scheme: dark) {
            :root {
                --color-background: #444444;
                --color-text: #f9f9f9;
            }
        }
        body {
            background: var(--color-background);
            margin: 10px auto;
            max-width: 650px;
            text-align: justify;
            line-height: 1.5;
            font-size: 18px;
            color: var(--color-text);
            padding: 15pt;
        }
        h1, h2 {
            text-align: left;
            line-height: 1.2;
        }
        .news-item {
            margin-bottom: 20px;
        }
        .news-content {
            display: none;
            margin-top: 5px;
        }
        a {
            border-bottom: 1px solid var(--color-text);
            color: var(--color-text);
            text-decoration: none;
            cursor: pointer;
        }
        a:hover {
            border-bottom: 0;
        }
        footer {
            text-align: center;
            font-size: 14px;
        }
"#;

const SCRIPT: &str = r#"
        function toggleContent(id) {
            const contentDiv = document.getElementById(id);
            if (contentDiv) {
                contentDiv.style.display = contentDiv.style.display === 'block' ? 'none' : 'block';
            }
        }
"#;

/// Group items by category, keeping first-seen category order and the
/// insertion order within each category.
pub fn group_by_category(items: &[NewsItem]) -> Vec<(&str, Vec<&NewsItem>)> {
    let mut groups: Vec<(&str, Vec<&NewsItem>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(category, _)| *category == item.category) {
            Some((_, members)) => members.push(item),
            None => groups.push((item.category.as_str(), vec![item])),
        }
    }
    groups
}

/// Render the full HTML document for `items`.
pub fn render_page(items: &[NewsItem], year: i32) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"nl\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("    <title>Latest News</title>\n");
    writeln!(html, "    <style>{STYLE}    </style>").unwrap();
    html.push_str("</head>\n<body>\n\n<h1>NOS Nieuws</h1>\n");

    // Categories that slugify alike stay apart through the group position.
    for (group, (category, members)) in group_by_category(items).into_iter().enumerate() {
        let slug = slugify(category);
        writeln!(html, "<section>\n  <h2>{}</h2>", escape_html(&upcase(category))).unwrap();
        html.push_str("  <div class=\"news-container\">\n");
        for (index, item) in members.iter().enumerate() {
            let id = escape_html(&format!("{group}-{slug}-{index}"));
            writeln!(
                html,
                "    <div class=\"news-item\">\n      <a class=\"news-title\" onclick=\"toggleContent('{id}')\">{}</a>\n      <div id=\"{id}\" class=\"news-content\">{}</div>\n    </div>",
                escape_html(&item.title),
                escape_html(&item.text),
            )
            .unwrap();
        }
        html.push_str("  </div>\n</section>\n");
    }

    writeln!(html, "\n<footer>\n  <p>&copy; {year} NOS</p>\n</footer>\n").unwrap();
    writeln!(html, "<script>{SCRIPT}</script>\n\n</body>\n</html>").unwrap();
    html
}

/// Load the cached items under `key` and render them.
///
/// An absent key or an empty item list is [`Display::NoData`]; a cached
/// value that does not parse is an error.
#[instrument(level = "info", skip(cache))]
pub async fn display<C: CacheStore>(cache: &C, key: &str, year: i32) -> Result<Display> {
    let items = match load_items(cache, key).await? {
        Some(items) if !items.is_empty() => items,
        _ => {
            warn!("No news items found in cache");
            return Ok(Display::NoData);
        }
    };
    info!(count = items.len(), "Rendering news items");
    Ok(Display::Page(render_page(&items, year)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store_items;
    use crate::cache::tests::MemoryCache;
    use crate::error::NewsError;

    fn item(title: &str, text: &str, category: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            text: text.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_group_by_category_keeps_first_seen_order() {
        let items = vec![
            item("a", "", "buitenland"),
            item("b", "", "binnenland"),
            item("c", "", "buitenland"),
        ];

        let groups = group_by_category(&items);
        let summary: Vec<(&str, Vec<&str>)> = groups
            .iter()
            .map(|(c, m)| (*c, m.iter().map(|i| i.title.as_str()).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![("buitenland", vec!["a", "c"]), ("binnenland", vec!["b"])]
        );
    }

    #[test]
    fn test_render_page_structure() {
        let items = vec![
            item("Kabinet valt", "Het kabinet is gevallen.", "binnenland"),
            item("Storm", "Veel schade.", "binnenland"),
            item("Verkiezingen", "Uitslag bekend.", "buitenland"),
        ];

        let html = render_page(&items, 2026);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>NOS Nieuws</h1>"));
        assert!(html.contains("<h2>Binnenland</h2>"));
        assert!(html.contains("<h2>Buitenland</h2>"));
        assert!(html.contains("toggleContent('0-binnenland-1')"));
        assert!(html.contains(r#"<div id="1-buitenland-0" class="news-content">Uitslag bekend.</div>"#));
        assert!(html.contains("&copy; 2026 NOS"));
        assert!(html.find("Binnenland").unwrap() < html.find("Buitenland").unwrap());
        assert!(html.find("Kabinet valt").unwrap() < html.find("Storm").unwrap());
    }

    #[test]
    fn test_render_page_ids_unique_when_categories_slugify_alike() {
        let items = vec![
            item("Een", "eerste", "binnenland"),
            item("Twee", "tweede", "Binnenland"),
            item("Drie", "derde", "Sport & Spel"),
            item("Vier", "vierde", "sport  spel"),
        ];

        let html = render_page(&items, 2026);
        for id in ["0-binnenland-0", "1-binnenland-0", "2-sport--spel-0", "3-sport--spel-0"] {
            assert_eq!(html.matches(&format!("id=\"{id}\"")).count(), 1, "{id}");
            assert!(html.contains(&format!("toggleContent('{id}')")));
        }
        assert!(html.contains(r#"<div id="1-binnenland-0" class="news-content">tweede</div>"#));
    }

    #[test]
    fn test_render_page_escapes_scraped_text() {
        let items = vec![item("<script>x</script>", "A & B", "binnenland")];

        let html = render_page(&items, 2026);
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("A &amp; B"));
        assert!(!html.contains("<script>x</script>"));
    }

    #[tokio::test]
    async fn test_display_absent_cache_is_no_data() {
        let cache = MemoryCache::default();
        assert_eq!(display(&cache, "news-items", 2026).await.unwrap(), Display::NoData);
    }

    #[tokio::test]
    async fn test_display_empty_list_is_no_data() {
        let cache = MemoryCache::default();
        store_items(&cache, "news-items", &[]).await.unwrap();

        assert_eq!(display(&cache, "news-items", 2026).await.unwrap(), Display::NoData);
    }

    #[tokio::test]
    async fn test_display_renders_cached_items() {
        let cache = MemoryCache::default();
        store_items(&cache, "news-items", &[item("Titel", "Tekst", "binnenland")])
            .await
            .unwrap();

        match display(&cache, "news-items", 2026).await.unwrap() {
            Display::Page(html) => assert!(html.contains("Titel")),
            Display::NoData => panic!("expected a rendered page"),
        }
    }

    #[tokio::test]
    async fn test_display_corrupt_cache_is_error() {
        let cache = MemoryCache::default();
        cache.put("news-items", "nope").await.unwrap();

        let result = display(&cache, "news-items", 2026).await;
        assert!(matches!(result, Err(NewsError::Json(_))));
    }
}
