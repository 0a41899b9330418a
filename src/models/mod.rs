// src/models/mod.rs

//! Domain models for the harvester.
//!
//! This module contains the configuration, portal definition and the
//! extracted listing record, organized by their primary purpose.

mod config;
mod portal;
mod record;

// Re-export all public types
pub use config::{
    Config, CrawlerConfig, ExtractionConfig, HarvestConfig, LocationMatch, OutputConfig,
    TabularFormat,
};
pub use portal::PortalConfig;
pub use record::{
    Extracted, FIELD_HEADERS, LicenseStatus, Record, SellerType, StudioMention, UNKNOWN, field_tag,
};

#[cfg(test)]
pub(crate) use record::sample_record;
