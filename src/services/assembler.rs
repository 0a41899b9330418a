// src/services/assembler.rs

//! Listing assembler.
//!
//! Drives each candidate link through
//! `Pending -> Fetched -> Parsed -> Extracted -> Done`. A link that fails to
//! fetch or parse ends in `Failed`; it is logged and the batch moves on.

use std::time::Duration;

use crate::error::Result;
use crate::models::{Config, ExtractionConfig, PortalConfig, Record};
use crate::services::classifiers::{Classifiers, classify_seller};
use crate::services::extractors::{
    LocationMatcher, extract_agency_contact, extract_description, extract_land_area,
    extract_price,
};
use crate::utils::html::ParsedPage;
use crate::utils::http::{PageRenderer, render_within};

/// Runs every extractor and classifier over one parsed page.
pub struct ListingExtractor {
    location: LocationMatcher,
    classifiers: Classifiers,
    title_max_chars: usize,
    description_max_chars: usize,
}

impl ListingExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            location: LocationMatcher::new(&config.locations, config.location_match)?,
            classifiers: Classifiers::new(config)?,
            title_max_chars: config.title_max_chars,
            description_max_chars: config.description_max_chars,
        })
    }

    /// Build the record for a page. Never fails; misses become fallbacks.
    pub fn extract(&self, url: &str, portal: &str, page: &ParsedPage) -> Record {
        let text = page.text.as_str();
        Record {
            listing_url: url.to_string(),
            portal: portal.to_string(),
            title: page.title(self.title_max_chars),
            price: extract_price(text),
            land_m2: extract_land_area(text),
            location: self.location.extract(text),
            description: extract_description(text, self.description_max_chars),
            agency_contact: extract_agency_contact(text),
            license: self.classifiers.classify_license(text),
            studio: self.classifiers.classify_studio(text),
            seller_type: classify_seller(text),
        }
    }
}

/// Result of assembling one portal's links.
#[derive(Debug, Default)]
pub struct AssemblyOutcome {
    pub records: Vec<Record>,
    pub link_total: usize,
    pub link_failures: usize,
}

/// Fetches candidate links one at a time and turns them into records.
pub struct ListingAssembler<'a> {
    renderer: &'a dyn PageRenderer,
    extractor: &'a ListingExtractor,
    timeout: Duration,
    delay: Duration,
}

impl<'a> ListingAssembler<'a> {
    pub fn new(
        renderer: &'a dyn PageRenderer,
        extractor: &'a ListingExtractor,
        config: &Config,
    ) -> Self {
        Self {
            renderer,
            extractor,
            timeout: Duration::from_secs(config.crawler.timeout_secs),
            delay: Duration::from_millis(config.crawler.request_delay_ms),
        }
    }

    /// Assemble records for every link, in link order.
    pub async fn assemble(&self, portal: &PortalConfig, links: &[String]) -> AssemblyOutcome {
        let mut outcome = AssemblyOutcome {
            link_total: links.len(),
            ..AssemblyOutcome::default()
        };

        for (i, link) in links.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            log::info!("Processing {}", link);
            match self.process_link(portal, link).await {
                Ok(record) => {
                    log::debug!("Done: {}", record.summary());
                    outcome.records.push(record);
                }
                Err(error) => {
                    outcome.link_failures += 1;
                    log::warn!("Skipping {}: {}", link, error);
                }
            }
        }

        outcome
    }

    async fn process_link(&self, portal: &PortalConfig, url: &str) -> Result<Record> {
        let html = render_within(self.renderer, url, self.timeout).await?;
        log::debug!("Fetched {} ({} bytes)", url, html.len());

        let page = ParsedPage::parse(url, &html)?;
        log::debug!("Parsed {} ({} chars of text)", url, page.text.len());

        Ok(self.extractor.extract(url, &portal.name, &page))
    }
}
