//! Page extraction pipeline
//!
//! Turns one page of HTML into resolved listing nodes:
//! - [`StateExtractor`] pulls the embedded JSON state out of the page
//! - [`node_map`] locates the flat node mapping inside that state
//! - [`GraphResolver`] inlines reference pointers
//! - [`page_count_hint`] looks for a total page count

mod graph;
mod state;

pub use graph::{
    as_reference, node_map, page_count_hint, resolve_listings, GraphNode, GraphResolver,
    GraphSchema, NodeKind, NodeMap, ResolvedListing, MAX_REFERENCE_DEPTH,
};
pub use state::StateExtractor;

use crate::config::SiteConfig;
use crate::ExtractionResult;

/// Structured content of one result page
#[derive(Debug, Clone, Default)]
pub struct ExtractedPage {
    /// Resolved listing nodes in document order
    pub listings: Vec<ResolvedListing>,

    /// Total page count, if the page advertised one
    pub page_count: Option<u32>,
}

/// Runs extraction and resolution for pages of one site
#[derive(Debug, Clone)]
pub struct PageExtractor {
    state: StateExtractor,
    schema: GraphSchema,
}

impl PageExtractor {
    pub fn new(state: StateExtractor, schema: GraphSchema) -> Self {
        Self { state, schema }
    }

    /// Builds the extractor described by a site configuration
    pub fn from_site(site: &SiteConfig) -> Self {
        Self::new(
            StateExtractor::new(site.state_marker.clone()),
            GraphSchema::new(
                site.listing_prefixes.clone(),
                site.search_result_prefixes.clone(),
            ),
        )
    }

    /// Extracts and resolves the listings of one page
    ///
    /// # Returns
    ///
    /// * `Ok(ExtractedPage)` - The page's listings (possibly none) and page count hint
    /// * `Err(ExtractionError)` - The page has no usable embedded state
    pub fn extract(&self, html: &str) -> ExtractionResult<ExtractedPage> {
        let state = self.state.extract(html)?;
        let nodes = node_map(&state)?;

        Ok(ExtractedPage {
            listings: resolve_listings(nodes, &self.schema),
            page_count: page_count_hint(nodes, &self.schema),
        })
    }
}
