//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, etc.)
//! - Logging option types shared with the CLI
//! - The library-level `DetectorConfig`
//! - The command-line options parsed by the binary

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command};
pub use constants::*;
pub use types::{DetectorConfig, KeywordOptions, LogFormat, LogLevel};
