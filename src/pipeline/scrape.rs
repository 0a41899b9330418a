// src/pipeline/scrape.rs

//! Full scrape: portals → links → records → exports.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::export::{RecordExporter, TabularExporter, XmlExporter, write_atomic};
use crate::models::{Config, PortalConfig, Record};
use crate::services::diagnostics;
use crate::services::{AssemblyOutcome, LinkHarvester, ListingAssembler, ListingExtractor};
use crate::utils::http::{PageRenderer, render_within};

/// Counters and artifacts of one run.
#[derive(Debug)]
pub struct RunSummary {
    pub date: NaiveDate,
    pub portal_total: usize,
    pub portal_failures: usize,
    pub link_total: usize,
    pub link_failures: usize,
    pub record_count: usize,
    /// Export artifacts actually written
    pub exported: Vec<PathBuf>,
    pub export_failures: usize,
}

impl RunSummary {
    fn new(date: NaiveDate, portal_total: usize) -> Self {
        Self {
            date,
            portal_total,
            portal_failures: 0,
            link_total: 0,
            link_failures: 0,
            record_count: 0,
            exported: Vec::new(),
            export_failures: 0,
        }
    }

    fn log(&self) {
        log::info!("Run summary for {}:", self.date.format("%Y-%m-%d"));
        log::info!(
            "    Portals: {} ({} failed)",
            self.portal_total,
            self.portal_failures
        );
        log::info!(
            "    Links: {} ({} failed)",
            self.link_total,
            self.link_failures
        );
        log::info!("    Records: {}", self.record_count);
        for path in &self.exported {
            log::info!("    Exported: {}", path.display());
        }
        if self.export_failures > 0 {
            log::info!("    Export failures: {}", self.export_failures);
        }
    }
}

/// Run the scraper over every configured portal and export the records.
///
/// Link, portal and export failures are logged and counted. Only an
/// invalid extraction config or an output root that cannot be created
/// aborts the run.
pub async fn run_scrape(
    config: &Config,
    renderer: &dyn PageRenderer,
    date: NaiveDate,
) -> Result<RunSummary> {
    let output_root = config.output.root();
    fs::create_dir_all(&output_root).map_err(|e| AppError::export(&output_root, e))?;

    let extractor = ListingExtractor::new(&config.extraction)?;
    let harvester = LinkHarvester::new(&config.harvest);
    let assembler = ListingAssembler::new(renderer, &extractor, config);

    let mut summary = RunSummary::new(date, config.portals.len());
    let mut records: Vec<Record> = Vec::new();

    for portal in &config.portals {
        log::info!("Scraping {}...", portal.name);
        match scrape_portal(config, renderer, &harvester, &assembler, portal).await {
            Ok(outcome) => {
                log::info!(
                    "{}: {} records from {} links",
                    portal.name,
                    outcome.records.len(),
                    outcome.link_total
                );
                summary.link_total += outcome.link_total;
                summary.link_failures += outcome.link_failures;
                records.extend(outcome.records);
            }
            Err(error) => {
                summary.portal_failures += 1;
                log::warn!("Skipping portal {}: {}", portal.name, error);
            }
        }
    }

    summary.record_count = records.len();
    if records.is_empty() {
        log::warn!("No data extracted. Nothing to export.");
        summary.log();
        return Ok(summary);
    }

    let tabular = TabularExporter::new(
        output_root,
        &config.output.label,
        config.output.tabular_format,
    );
    let xml = XmlExporter::new(config.output.xml_dir(), &config.output.label);
    let exporters: [&dyn RecordExporter; 2] = [&tabular, &xml];

    for exporter in exporters {
        match exporter.export(&records, date) {
            Ok(path) => summary.exported.push(path),
            Err(error) => {
                summary.export_failures += 1;
                log::error!("{} export failed: {}", exporter.name(), error);
            }
        }
    }

    summary.log();
    Ok(summary)
}

/// Fetch a portal's index, harvest its links and assemble their records.
async fn scrape_portal(
    config: &Config,
    renderer: &dyn PageRenderer,
    harvester: &LinkHarvester,
    assembler: &ListingAssembler<'_>,
    portal: &PortalConfig,
) -> Result<AssemblyOutcome> {
    let timeout = Duration::from_secs(config.crawler.timeout_secs);
    let html = render_within(renderer, &portal.index_url, timeout).await?;
    log::info!("Fetched {} - Length: {}", portal.name, html.len());

    if config.output.debug_dump {
        let dump_path = config.output.root().join(portal.debug_file_name());
        match write_atomic(&dump_path, html.as_bytes()) {
            Ok(()) => log::debug!("Wrote debug dump {}", dump_path.display()),
            Err(error) => log::warn!("Debug dump failed: {}", error),
        }
    }

    let links = harvester.harvest(&html, &portal.link_selector, &portal.base_url)?;
    log::info!("Found {} links.", links.len());
    if links.is_empty() {
        log::warn!(
            "{} yielded no candidate links; check link_selector '{}'",
            portal.name,
            portal.link_selector
        );
    }

    let outcome = assembler.assemble(portal, &links).await;

    diagnostics::report(&portal.name, &html, config.harvest.diagnostic_top);

    Ok(outcome)
}
