//! Category-wide scrape run.
//!
//! Pages are extracted one at a time in configuration order. A failing page
//! is logged and recorded in [`Aggregation::failures`]; it never stops the
//! run or discards items collected before it.

use crate::models::{Aggregation, PageFailure, PageSpec};
use crate::scrapers::teletext::{PageExtractor, PageSource};
use futures::stream::{self, StreamExt};
use tracing::{error, info, instrument};

/// Extract every page in `specs` and collect the results.
#[instrument(level = "info", skip_all, fields(pages = specs.len()))]
pub async fn aggregate<S: PageSource>(extractor: &PageExtractor<S>, specs: &[PageSpec]) -> Aggregation {
    let aggregation = stream::iter(specs)
        .fold(Aggregation::default(), |mut acc, spec| async move {
            match extractor.extract(spec.page, &spec.category).await {
                Ok(item) => {
                    info!(page = spec.page, "Processing '{}'", item.title);
                    acc.items.push(item);
                }
                Err(e) => {
                    error!(page = spec.page, category = %spec.category, error = %e, "Error processing page");
                    acc.failures.push(PageFailure {
                        page: spec.page,
                        category: spec.category.clone(),
                        error: e.to_string(),
                    });
                }
            }
            acc
        })
        .await;

    info!(
        total = specs.len(),
        successful = aggregation.items.len(),
        failed = aggregation.failures.len(),
        "Completed scrape run"
    );
    aggregation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::teletext::tests::{FakeSource, page_html};
    use std::sync::Arc;

    fn spec(page: u32, category: &str) -> PageSpec {
        PageSpec {
            page,
            category: category.to_string(),
        }
    }

    fn extractor(source: FakeSource) -> PageExtractor<FakeSource> {
        PageExtractor::new(source, "span.yellow.bg-blue", "span.cyan")
    }

    #[tokio::test]
    async fn test_failed_page_is_skipped_and_recorded() {
        let source = FakeSource::default()
            .with_page(1, &page_html(&["Een"], &["tekst een"]))
            .with_page(3, &page_html(&["Drie"], &["tekst drie"]));
        let extractor = extractor(source);
        let specs = vec![spec(1, "A"), spec(2, "A"), spec(3, "B")];

        let result = aggregate(&extractor, &specs).await;

        let titles: Vec<&str> = result.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Een", "Drie"]);
        assert_eq!(result.items[0].category, "A");
        assert_eq!(result.items[1].category, "B");

        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].page, 2);
        assert_eq!(result.failures[0].category, "A");
        assert!(result.failures[0].error.contains("not found"));
    }

    #[tokio::test]
    async fn test_pages_requested_sequentially_in_config_order() {
        let source = FakeSource::default()
            .with_page(125, &page_html(&["x"], &["y"]))
            .with_page(104, &page_html(&["x"], &["y"]));
        let requested = Arc::clone(&source.requested);
        let extractor = extractor(source);
        let specs = vec![spec(125, "buitenland"), spec(999, "buitenland"), spec(104, "binnenland")];

        aggregate(&extractor, &specs).await;

        assert_eq!(*requested.lock().unwrap(), vec![125, 999, 104]);
    }

    #[tokio::test]
    async fn test_all_pages_failing_yields_empty_result() {
        let extractor = extractor(FakeSource::default());
        let specs = vec![spec(1, "A"), spec(2, "A")];

        let result = aggregate(&extractor, &specs).await;
        assert!(result.items.is_empty());
        assert_eq!(result.failures.len(), 2);
    }

    #[tokio::test]
    async fn test_no_pages_configured() {
        let extractor = extractor(FakeSource::default());

        let result = aggregate(&extractor, &[]).await;
        assert!(result.items.is_empty());
        assert!(result.failures.is_empty());
    }

    #[tokio::test]
    async fn test_result_size_is_total_minus_failures() {
        let source = (1..=5).fold(FakeSource::default(), |s, p| {
            s.with_page(p, &page_html(&["t"], &["b"]))
        });
        let extractor = extractor(source);
        let specs: Vec<PageSpec> = (1..=8).map(|p| spec(p, "A")).collect();

        let result = aggregate(&extractor, &specs).await;
        assert_eq!(result.items.len(), 5);
        assert_eq!(result.items.len() + result.failures.len(), specs.len());
    }
}
