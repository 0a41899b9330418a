//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::PortalConfig;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fetch and pacing behavior
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Candidate link discovery rules
    #[serde(default)]
    pub harvest: HarvestConfig,

    /// Field extraction and classifier keyword sets
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Export locations and naming
    #[serde(default)]
    pub output: OutputConfig,

    /// Source portals, processed in order
    #[serde(default = "defaults::portals")]
    pub portals: Vec<PortalConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.harvest.max_links == 0 {
            return Err(AppError::validation("harvest.max_links must be > 0"));
        }
        if self.harvest.detail_marker.is_empty() {
            return Err(AppError::validation("harvest.detail_marker is empty"));
        }
        if self.extraction.license_keywords.is_empty() {
            return Err(AppError::validation("No license keywords defined"));
        }
        if self.extraction.studio_keywords.is_empty() {
            return Err(AppError::validation("No studio keywords defined"));
        }
        if self.extraction.studio_suffixes.is_empty() {
            return Err(AppError::validation("No studio suffixes defined"));
        }
        if self.output.label.trim().is_empty() {
            return Err(AppError::validation("output.label is empty"));
        }
        if self.portals.is_empty() {
            return Err(AppError::validation("No portals defined"));
        }
        for portal in &self.portals {
            portal.validate()?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            harvest: HarvestConfig::default(),
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
            portals: defaults::portals(),
        }
    }
}

impl PortalConfig {
    /// Check that the portal URLs parse and the selector is present.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("portal name is empty"));
        }
        if self.link_selector.trim().is_empty() {
            return Err(AppError::validation(format!(
                "portal '{}' has an empty link_selector",
                self.name
            )));
        }
        Url::parse(&self.index_url).map_err(|e| {
            AppError::validation(format!("portal '{}' index_url: {e}", self.name))
        })?;
        Url::parse(&self.base_url).map_err(|e| {
            AppError::validation(format!("portal '{}' base_url: {e}", self.name))
        })?;
        Ok(())
    }
}

/// Render client and pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-page render timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between successive detail-page fetches in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Candidate link discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Maximum number of detail links taken from one index page
    #[serde(default = "defaults::max_links")]
    pub max_links: usize,

    /// Path fragment every detail-page link must contain
    #[serde(default = "defaults::detail_marker")]
    pub detail_marker: String,

    /// Sort links lexicographically after deduplication
    #[serde(default = "defaults::sort_links")]
    pub sort_links: bool,

    /// Number of anchor class combinations reported by the diagnostics
    #[serde(default = "defaults::diagnostic_top")]
    pub diagnostic_top: usize,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            max_links: defaults::max_links(),
            detail_marker: defaults::detail_marker(),
            sort_links: defaults::sort_links(),
            diagnostic_top: defaults::diagnostic_top(),
        }
    }
}

/// How place names are matched against page text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMatch {
    /// Plain case-insensitive substring test
    #[default]
    Substring,
    /// Case-insensitive match on word boundaries
    Word,
}

/// Extraction and classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Known place names, in priority order
    #[serde(default = "defaults::locations")]
    pub locations: Vec<String>,

    #[serde(default)]
    pub location_match: LocationMatch,

    /// Keywords signalling a building license
    #[serde(default = "defaults::license_keywords")]
    pub license_keywords: Vec<String>,

    /// Keywords signalling an architecture studio
    #[serde(default = "defaults::studio_keywords")]
    pub studio_keywords: Vec<String>,

    /// Trailing words of a named studio ("Nordic Architects")
    #[serde(default = "defaults::studio_suffixes")]
    pub studio_suffixes: Vec<String>,

    #[serde(default = "defaults::title_max_chars")]
    pub title_max_chars: usize,

    #[serde(default = "defaults::description_max_chars")]
    pub description_max_chars: usize,

    /// Maximum evidence sentences kept per license judgment
    #[serde(default = "defaults::evidence_limit")]
    pub evidence_limit: usize,

    /// Maximum length of a single evidence sentence
    #[serde(default = "defaults::evidence_max_chars")]
    pub evidence_max_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            locations: defaults::locations(),
            location_match: LocationMatch::default(),
            license_keywords: defaults::license_keywords(),
            studio_keywords: defaults::studio_keywords(),
            studio_suffixes: defaults::studio_suffixes(),
            title_max_chars: defaults::title_max_chars(),
            description_max_chars: defaults::description_max_chars(),
            evidence_limit: defaults::evidence_limit(),
            evidence_max_chars: defaults::evidence_max_chars(),
        }
    }
}

/// File format of the tabular export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabularFormat {
    /// Excel workbook
    #[default]
    Xlsx,
    Csv,
}

impl TabularFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for all run artifacts
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    /// Subdirectory (under `dir`) for the XML export
    #[serde(default = "defaults::xml_subdir")]
    pub xml_subdir: String,

    /// File name prefix shared by both exports
    #[serde(default = "defaults::label")]
    pub label: String,

    #[serde(default)]
    pub tabular_format: TabularFormat,

    /// Write the raw index page of each portal before harvesting
    #[serde(default = "defaults::debug_dump")]
    pub debug_dump: bool,
}

impl OutputConfig {
    pub fn root(&self) -> PathBuf {
        PathBuf::from(&self.dir)
    }

    pub fn xml_dir(&self) -> PathBuf {
        self.root().join(&self.xml_subdir)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            xml_subdir: defaults::xml_subdir(),
            label: defaults::label(),
            tabular_format: TabularFormat::default(),
            debug_dump: defaults::debug_dump(),
        }
    }
}

mod defaults {
    use super::PortalConfig;

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; estate-harvester/0.1)".into()
    }
    pub fn timeout() -> u64 {
        60
    }
    pub fn request_delay() -> u64 {
        1000
    }

    // Harvest defaults
    pub fn max_links() -> usize {
        3
    }
    pub fn detail_marker() -> String {
        "/listing/".into()
    }
    pub fn sort_links() -> bool {
        true
    }
    pub fn diagnostic_top() -> usize {
        10
    }

    // Extraction defaults
    pub fn locations() -> Vec<String> {
        ["Marbella", "Estepona", "Benahavís", "Mijas"]
            .into_iter()
            .map(String::from)
            .collect()
    }
    pub fn license_keywords() -> Vec<String> {
        [
            "licencia",
            "permit",
            "ready to build",
            "project approved",
            "concedida",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
    pub fn studio_keywords() -> Vec<String> {
        ["architect", "studio", "design", "drawn by"]
            .into_iter()
            .map(String::from)
            .collect()
    }
    pub fn studio_suffixes() -> Vec<String> {
        ["Architects", "Studio", "Design", "Group"]
            .into_iter()
            .map(String::from)
            .collect()
    }
    pub fn title_max_chars() -> usize {
        100
    }
    pub fn description_max_chars() -> usize {
        1000
    }
    pub fn evidence_limit() -> usize {
        2
    }
    pub fn evidence_max_chars() -> usize {
        300
    }

    // Output defaults
    pub fn output_dir() -> String {
        "output".into()
    }
    pub fn xml_subdir() -> String {
        "xml".into()
    }
    pub fn label() -> String {
        "marbella_listings".into()
    }
    pub fn debug_dump() -> bool {
        true
    }

    // Portal defaults
    pub fn portals() -> Vec<PortalConfig> {
        vec![PortalConfig {
            name: "Properstar".to_string(),
            index_url: "https://www.properstar.es/spain/compra/terreno/marbella".to_string(),
            link_selector: "div[data-testid='listing-card']".to_string(),
            base_url: "https://www.properstar.es".to_string(),
        }]
    }
}
