//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `cms_detect` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use cms_detect::config::{Cli, Command};
use cms_detect::initialization::init_logger_with;
use cms_detect::server::{start_server, ServerState};
use cms_detect::{CmsDetector, RulesetMatcher};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let fingerprints = cli.fingerprints.clone().context(
        "No fingerprint ruleset given; pass --fingerprints or set CMS_DETECT_FINGERPRINTS",
    )?;
    let matcher = RulesetMatcher::from_path(&fingerprints)
        .await
        .context("Failed to load fingerprint ruleset")?;
    if matcher.is_empty() {
        log::warn!(
            "Ruleset at {} has no technologies; nothing will be detected",
            fingerprints.display()
        );
    }

    let config = cli
        .detector_config()
        .context("Invalid detector configuration")?;
    let detector =
        CmsDetector::new(config, Arc::new(matcher)).context("Failed to initialize detector")?;

    match cli.command {
        Command::Detect { url, pretty } => {
            let output = match detector.report(&url).await {
                Some(report) => serde_json::to_value(&report)
                    .context("Failed to serialize report")?,
                None => serde_json::json!({}),
            };
            let rendered = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }
            .context("Failed to render report")?;
            println!("{}", rendered);
        }
        Command::Serve { port } => {
            start_server(port, ServerState::new(detector)).await?;
        }
    }

    Ok(())
}
