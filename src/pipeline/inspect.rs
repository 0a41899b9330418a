// src/pipeline/inspect.rs

//! Offline commands that work on saved HTML files.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{Config, Record};
use crate::services::ListingExtractor;
use crate::services::diagnostics::anchor_class_frequencies;
use crate::utils::html::ParsedPage;

/// Run the extraction suite on a saved detail page.
pub fn run_extract(config: &Config, html_path: &Path, url: &str, portal: &str) -> Result<Record> {
    let html = fs::read_to_string(html_path)?;
    let page = ParsedPage::parse(url, &html)?;
    let extractor = ListingExtractor::new(&config.extraction)?;
    Ok(extractor.extract(url, portal, &page))
}

/// Anchor class frequencies of a saved index page (usually a debug dump).
pub fn run_analyze(html_path: &Path, top_n: usize) -> Result<Vec<(String, usize)>> {
    let html = fs::read_to_string(html_path)?;
    Ok(anchor_class_frequencies(&html, top_n))
}
