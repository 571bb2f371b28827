//! Selector-driven text visitor over an HTML document.
//!
//! A [`MarkupScanner`] holds `(selector, visitor)` bindings. [`MarkupScanner::run`]
//! parses the document once and walks its text nodes in document order,
//! handing each node's text to every visitor whose selector matches the
//! node's parent element or one of its ancestors.

use crate::error::{NewsError, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

type Visitor<'a> = Box<dyn FnMut(&str) + 'a>;

pub struct MarkupScanner<'a> {
    bindings: Vec<(Selector, Visitor<'a>)>,
}

impl<'a> MarkupScanner<'a> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Register `visitor` for text inside elements matching `selector`.
    ///
    /// # Errors
    ///
    /// [`NewsError::Selector`] when `selector` is not valid CSS.
    pub fn on(mut self, selector: &str, visitor: impl FnMut(&str) + 'a) -> Result<Self> {
        let parsed = Selector::parse(selector).map_err(|e| NewsError::Selector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        self.bindings.push((parsed, Box::new(visitor)));
        Ok(self)
    }

    /// Parse `document` and feed matching text nodes to the visitors in one pass.
    ///
    /// Returns the number of visitor invocations.
    #[instrument(level = "debug", skip_all, fields(bytes = document.len()))]
    pub fn run(mut self, document: &str) -> usize {
        let html = Html::parse_document(document);
        let mut visits = 0;

        for node in html.tree.root().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let text: &str = text;
            let ancestors: Vec<ElementRef> = node.ancestors().filter_map(ElementRef::wrap).collect();
            for (selector, visitor) in self.bindings.iter_mut() {
                if ancestors.iter().any(|el| selector.matches(el)) {
                    visitor(text);
                    visits += 1;
                }
            }
        }

        debug!(visits, "Markup scan complete");
        visits
    }
}

impl Default for MarkupScanner<'_> {
    fn default() -> Self {
        Self::new()
    }
}
