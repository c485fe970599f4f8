//! Embedded state extraction
//!
//! Server-rendered pages carry their client-side data as a JSON document in
//! a marked `<script>` element. This module finds that element and parses
//! its content.

use crate::{ExtractionError, ExtractionResult};
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("static selector is valid"));

/// Pulls the embedded state document out of raw page HTML
#[derive(Debug, Clone)]
pub struct StateExtractor {
    marker: String,
}

impl StateExtractor {
    /// Creates an extractor for the script element with the given `id`
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// The script element id this extractor looks for
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Returns the parsed JSON content of the marked script block
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The parsed state tree
    /// * `Err(ExtractionError::NotFound)` - No script element carries the marker
    /// * `Err(ExtractionError::Parse)` - The block's content is not valid JSON
    ///
    /// # Example
    ///
    /// ```
    /// use jobgraph::extract::StateExtractor;
    ///
    /// let html = r#"<html><body><script id="__NEXT_DATA__" type="application/json">{"props":{}}</script></body></html>"#;
    /// let state = StateExtractor::new("__NEXT_DATA__").extract(html).unwrap();
    /// assert!(state.get("props").is_some());
    /// ```
    pub fn extract(&self, html: &str) -> ExtractionResult<Value> {
        let document = Html::parse_document(html);

        let script = document
            .select(&SCRIPT_SELECTOR)
            .find(|element| element.value().id() == Some(self.marker.as_str()))
            .ok_or_else(|| ExtractionError::NotFound {
                marker: self.marker.clone(),
            })?;

        let content: String = script.text().collect();
        Ok(serde_json::from_str(content.trim())?)
    }
}
