//! URL handling module for Jobgraph
//!
//! This module builds search result page URLs and job detail URLs from
//! free-text search terms and listing slugs.

mod slug;

pub use slug::slugify;

use url::Url;

/// Role searched for when the caller gives no usable search term
pub const DEFAULT_ROLE: &str = "developer";

/// Builds the result page URLs for one search
///
/// Page URLs follow the scheme `{base}/role/{role}` or
/// `{base}/role/l/{role}/{location}` when a location is given, with
/// `?page={n}` appended for pages after the first.
#[derive(Debug, Clone)]
pub struct SearchUrls {
    base: String,
    role_slug: String,
    location_slug: Option<String>,
}

impl SearchUrls {
    /// Creates the URL builder for a search term and optional location
    ///
    /// # Examples
    ///
    /// ```
    /// use jobgraph::url::SearchUrls;
    ///
    /// let urls = SearchUrls::new("https://wellfound.com", "Rust Engineer", Some("New York"));
    /// assert_eq!(
    ///     urls.page_url(2).unwrap().as_str(),
    ///     "https://wellfound.com/role/l/rust-engineer/new-york?page=2"
    /// );
    /// ```
    pub fn new(base_url: &str, search_term: &str, location: Option<&str>) -> Self {
        let role_slug = match slugify(search_term) {
            slug if slug.is_empty() => DEFAULT_ROLE.to_string(),
            slug => slug,
        };
        let location_slug = location.map(slugify).filter(|slug| !slug.is_empty());

        Self {
            base: base_url.trim_end_matches('/').to_string(),
            role_slug,
            location_slug,
        }
    }

    /// The slug used for the role path segment
    pub fn role_slug(&self) -> &str {
        &self.role_slug
    }

    /// The slug used for the location path segment, if any
    pub fn location_slug(&self) -> Option<&str> {
        self.location_slug.as_deref()
    }

    /// Returns the URL of the given 1-based result page
    pub fn page_url(&self, page: u32) -> Result<Url, url::ParseError> {
        let mut url = match &self.location_slug {
            Some(location) => format!("{}/role/l/{}/{}", self.base, self.role_slug, location),
            None => format!("{}/role/{}", self.base, self.role_slug),
        };

        if page > 1 {
            url.push_str(&format!("?page={}", page));
        }

        Url::parse(&url)
    }
}

/// Builds the public URL of a job listing
///
/// Prefers the human-readable `{base}/jobs/{company}/{listing}` form and
/// falls back to `{base}/jobs?id={id}` when either slug is missing. Returns
/// `None` when neither form can be built.
pub fn job_url(
    base_url: &str,
    company_slug: Option<&str>,
    listing_slug: Option<&str>,
    raw_id: Option<&str>,
) -> Option<String> {
    let base = base_url.trim_end_matches('/');

    match (non_empty(company_slug), non_empty(listing_slug)) {
        (Some(company), Some(listing)) => Some(format!("{}/jobs/{}/{}", base, company, listing)),
        _ => non_empty(raw_id).map(|id| format!("{}/jobs?id={}", base, id)),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
