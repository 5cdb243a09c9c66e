//! CLI command definitions
//!
//! Defines the clap commands for the contract runner.

use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the contract steps against the API
    Run {
        /// Configuration file (default: platform config dir)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Base URL of the API under test
        #[arg(long)]
        base_url: Option<String>,

        /// Login username
        #[arg(long, short)]
        username: Option<String>,

        /// Login password
        #[arg(long, short)]
        password: Option<String>,

        /// Re-list after deleting and check the story is gone
        #[arg(long)]
        verify_deletion: bool,

        /// Report format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List the steps in the order they run
    Steps {
        /// Include the post-delete verification step
        #[arg(long)]
        verify_deletion: bool,
    },

    /// Show where the config file lives and the effective settings
    Config {
        /// Configuration file (default: platform config dir)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

/// How `run` reports results on stdout
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored progress lines and a summary
    Human,
    /// A single JSON report
    Json,
}
