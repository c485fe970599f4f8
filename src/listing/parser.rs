//! Listing node → [`JobPosting`]

use crate::config::SiteConfig;
use crate::extract::ResolvedListing;
use crate::listing::fields::{self, first_present, first_text};
use crate::listing::{
    extract_emails, parse_compensation, parse_date, parse_job_types, parse_location_value,
    JobPosting,
};
use crate::url::job_url;
use crate::ListingError;
use serde_json::Value;

/// Converts resolved listing nodes into canonical postings
#[derive(Debug, Clone)]
pub struct ListingParser {
    base_url: String,
    id_prefix: String,
}

impl ListingParser {
    pub fn new(base_url: impl Into<String>, id_prefix: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            id_prefix: id_prefix.into(),
        }
    }

    /// Builds the parser described by a site configuration
    pub fn from_site(site: &SiteConfig) -> Self {
        Self::new(site.base_url.clone(), site.id_prefix.clone())
    }

    /// Parses one resolved listing
    ///
    /// # Returns
    ///
    /// * `Ok(JobPosting)` - The listing had an id, a title and a buildable URL
    /// * `Err(ListingError)` - The listing is unusable and should be skipped
    pub fn parse(&self, listing: &ResolvedListing) -> Result<JobPosting, ListingError> {
        let node = &listing.body;
        let key = || listing.key.clone();

        let raw_id =
            first_text(node, fields::ID).ok_or_else(|| ListingError::MissingId { key: key() })?;
        let title = first_text(node, fields::TITLE)
            .ok_or_else(|| ListingError::MissingTitle { key: key() })?;

        let company = first_present(node, fields::COMPANY).filter(|c| c.is_object());
        let company_field = |keys: fields::FieldKeys| company.and_then(|c| first_text(c, keys));

        let job_url = job_url(
            &self.base_url,
            company_field(fields::SLUG).as_deref(),
            first_text(node, fields::SLUG).as_deref(),
            Some(raw_id.as_str()),
        )
        .ok_or_else(|| ListingError::MissingUrl { key: key() })?;

        let description = first_text(node, fields::DESCRIPTION);
        let emails = description
            .as_deref()
            .map(extract_emails)
            .unwrap_or_default();

        Ok(JobPosting {
            id: format!("{}-{}", self.id_prefix, raw_id),
            title,
            company_name: company_field(fields::COMPANY_NAME),
            company_url: company_field(fields::COMPANY_URL),
            company_logo: company_field(fields::COMPANY_LOGO),
            company_size: company_field(fields::COMPANY_SIZE),
            job_url,
            location: first_present(node, fields::LOCATION).and_then(parse_location_value),
            compensation: first_text(node, fields::COMPENSATION)
                .as_deref()
                .and_then(parse_compensation),
            job_types: first_present(node, fields::JOB_TYPE)
                .map(parse_job_types)
                .unwrap_or_default(),
            date_posted: first_present(node, fields::DATE_POSTED).and_then(parse_date),
            is_remote: first_present(node, fields::REMOTE).and_then(parse_remote),
            description,
            emails,
        })
    }

    /// Parses every listing of a page, skipping unusable ones
    ///
    /// Returns the postings in input order along with the number skipped.
    pub fn parse_all(&self, listings: &[ResolvedListing]) -> (Vec<JobPosting>, usize) {
        let mut postings = Vec::with_capacity(listings.len());
        let mut skipped = 0;

        for listing in listings {
            match self.parse(listing) {
                Ok(posting) => postings.push(posting),
                Err(e) => {
                    tracing::debug!("Skipping listing: {}", e);
                    skipped += 1;
                }
            }
        }

        (postings, skipped)
    }
}

fn parse_remote(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => Some(matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "yes" | "1"
        )),
        _ => None,
    }
}
