//! Service layer for the harvester.
//!
//! This module contains the extraction engine:
//! - Candidate link discovery (`LinkHarvester`)
//! - Field extraction (`extractors`)
//! - Keyword classification (`Classifiers`)
//! - Per-link record assembly (`ListingAssembler`)
//! - Anchor class diagnostics (`diagnostics`)

pub mod assembler;
pub mod classifiers;
pub mod diagnostics;
pub mod extractors;
pub mod harvester;

pub use assembler::{AssemblyOutcome, ListingAssembler, ListingExtractor};
pub use classifiers::{Classifiers, classify_seller};
pub use harvester::LinkHarvester;
