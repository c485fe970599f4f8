//! Output module for writing postings and crawl summaries
//!
//! This module handles:
//! - Serializing postings as a JSON array or JSON Lines
//! - Choosing between a file and stdout
//! - Rendering the end-of-crawl summary

mod json;
pub mod stats;
mod traits;

pub use json::JsonSink;
pub use stats::{format_summary, print_summary};
pub use traits::{CrawlSummary, OutputSink};

use crate::config::OutputConfig;
use crate::OutputResult;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// Opens the sink described by the output configuration
///
/// # Returns
///
/// * `Ok(Box<dyn OutputSink>)` - A sink writing to the configured file, or stdout
/// * `Err(OutputError)` - The output file could not be created
pub fn open_sink(config: &OutputConfig) -> OutputResult<Box<dyn OutputSink>> {
    match &config.path {
        Some(path) => {
            let file = File::create(Path::new(path))?;
            tracing::debug!("Writing postings to {}", path);
            Ok(Box::new(JsonSink::new(BufWriter::new(file), config.format)))
        }
        None => Ok(Box::new(JsonSink::new(
            BufWriter::new(io::stdout()),
            config.format,
        ))),
    }
}
