//! Listing parsing
//!
//! This module turns resolved listing nodes into [`JobPosting`] records:
//! - Declarative alternate-key lookup for loosely named fields
//! - Free-text normalizers for compensation, location, job type and dates
//! - Job URL construction and email extraction

mod compensation;
mod date;
mod email;
pub mod fields;
mod job_type;
mod location;
mod parser;
mod posting;

pub use compensation::{parse_compensation, DEFAULT_CURRENCY};
pub use date::{parse_date, parse_date_str};
pub use email::extract_emails;
pub use job_type::{parse_job_type, parse_job_types};
pub use location::{parse_location, parse_location_value};
pub use parser::ListingParser;
pub use posting::{Compensation, CompensationInterval, JobPosting, JobType, Location};
