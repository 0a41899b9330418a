//! Estate Harvester CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use harvester::{
    error::Result,
    models::Config,
    pipeline,
    utils::http::HttpRenderer,
};

/// Estate Harvester - Real-estate listing scraper
#[derive(Parser, Debug)]
#[command(
    name = "estate-harvester",
    version,
    about = "Harvests real-estate listings into CSV and XML"
)]

struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the output directory
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape every configured portal and export the listings
    Run,

    /// Extract a record from a saved listing page and print it as JSON
    Extract {
        /// Saved HTML file
        file: PathBuf,

        /// URL recorded as the listing URL
        #[arg(long, default_value = "")]
        url: String,

        /// Portal name recorded in the output
        #[arg(long, default_value = "local")]
        portal: String,
    },

    /// Report the most common anchor classes of a saved index page
    Analyze {
        /// Saved HTML file, usually a debug dump
        file: PathBuf,

        /// Number of class combinations to show
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(dir) = cli.output {
        config.output.dir = dir;
    }

    match cli.command {
        Command::Run => {
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }

            log::info!(
                "Estate Harvester starting with {} portal(s)...",
                config.portals.len()
            );

            let renderer = HttpRenderer::new(&config.crawler)?;
            let date = Local::now().date_naive();
            let summary = match pipeline::run_scrape(&config, &renderer, date).await {
                Ok(summary) => summary,
                Err(e) => {
                    log::error!("Unexpected error during run: {}", e);
                    return Err(e);
                }
            };

            if summary.record_count == 0 {
                log::warn!("Run finished without records.");
            } else {
                log::info!("Run complete!");
            }
        }

        Command::Extract { file, url, portal } => {
            let record = pipeline::run_extract(&config, &file, &url, &portal)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Command::Analyze { file, top } => {
            let ranked = pipeline::run_analyze(&file, top)?;
            log::info!("Top anchor class names in {}:", file.display());
            for (classes, count) in ranked {
                log::info!("  - {} : {} occurrences", classes, count);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK ({} portals, {} places, {} license keywords)",
                config.portals.len(),
                config.extraction.locations.len(),
                config.extraction.license_keywords.len()
            );
        }
    }

    Ok(())
}
