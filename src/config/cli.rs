//! Command-line options.
//!
//! The binary parses `Cli` and turns it into a `DetectorConfig`; the library
//! itself never reads the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::constants::{
    DEFAULT_FEED_ITEM_LIMIT, DEFAULT_KEYWORD_COUNT, DEFAULT_MIN_KEYWORD_LEN,
    DEFAULT_SERVICE_PORT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::config::types::{DetectorConfig, KeywordOptions, LogFormat, LogLevel};
use crate::error_handling::InitializationError;
use crate::resolve::UrlFilter;

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Detect one site and print the report
/// cms_detect --fingerprints ./technologies detect https://blog.example.com --pretty
///
/// # Run the portal service on the default port
/// cms_detect --fingerprints ./technologies serve
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "cms_detect",
    about = "Detects the CMS behind a web page and finds sample items in its search feed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Wappalyzer-format technologies file or directory
    ///
    /// categories.json is looked up next to the file, or in the directory's parent.
    #[arg(long, global = true, env = "CMS_DETECT_FINGERPRINTS")]
    pub fingerprints: Option<PathBuf>,

    /// Page and feed fetch timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Only URLs matching this regular expression are processed
    #[arg(long, global = true)]
    pub include: Option<String>,

    /// URLs matching this regular expression are skipped
    #[arg(long, global = true)]
    pub exclude: Option<String>,

    /// Maximum number of test items read from the search feed
    #[arg(long, global = true, default_value_t = DEFAULT_FEED_ITEM_LIMIT)]
    pub feed_items: usize,

    /// Maximum number of keywords taken from the page
    #[arg(long, global = true, default_value_t = DEFAULT_KEYWORD_COUNT)]
    pub keywords: usize,

    /// Minimum keyword length in characters
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_KEYWORD_LEN)]
    pub min_keyword_len: usize,

    /// HTTP User-Agent header value
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Detect a single URL and print the report as JSON
    Detect {
        /// URL to inspect
        url: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Run the portal HTTP service
    Serve {
        /// Port to listen on (127.0.0.1)
        #[arg(long, default_value_t = DEFAULT_SERVICE_PORT)]
        port: u16,
    },
}

impl Cli {
    /// Builds the detector configuration from the parsed options.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::UrlFilterError` if `--include` or
    /// `--exclude` is not a valid regular expression.
    pub fn detector_config(&self) -> Result<DetectorConfig, InitializationError> {
        Ok(DetectorConfig {
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent.clone(),
            url_filter: UrlFilter::new(self.include.as_deref(), self.exclude.as_deref())?,
            feed_item_limit: self.feed_items,
            keywords: KeywordOptions {
                count: self.keywords,
                min_len: self.min_keyword_len,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_detect_defaults() {
        let cli = Cli::try_parse_from([
            "cms_detect",
            "--fingerprints",
            "rules/technologies.json",
            "detect",
            "blog.example.com",
        ])
        .expect("valid arguments");

        match &cli.command {
            Command::Detect { url, pretty } => {
                assert_eq!(url, "blog.example.com");
                assert!(!pretty);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let config = cli.detector_config().expect("valid config");
        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.feed_item_limit, 3);
        assert_eq!(config.keywords, KeywordOptions::default());
    }

    #[test]
    fn test_cli_serve_with_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cms_detect",
            "serve",
            "--port",
            "5000",
            "--timeout-seconds",
            "7",
            "--exclude",
            r"\.gov/",
        ])
        .expect("valid arguments");

        assert!(matches!(cli.command, Command::Serve { port: 5000 }));
        let config = cli.detector_config().expect("valid config");
        assert_eq!(config.timeout_seconds, 7);
        assert!(!config.url_filter.is_eligible("https://www.irs.gov/"));
    }

    #[test]
    fn test_cli_invalid_filter() {
        let cli = Cli::try_parse_from(["cms_detect", "--include", "(", "serve"])
            .expect("valid arguments");
        assert!(matches!(
            cli.detector_config(),
            Err(InitializationError::UrlFilterError { .. })
        ));
    }
}
