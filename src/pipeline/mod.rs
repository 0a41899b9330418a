//! Pipeline entry points.
//!
//! - `run_scrape`: Harvest every portal and export the records
//! - `run_extract`: Extract a record from a saved page
//! - `run_analyze`: Anchor class report for a saved index page

pub mod inspect;
pub mod scrape;

pub use inspect::{run_analyze, run_extract};
pub use scrape::{RunSummary, run_scrape};
