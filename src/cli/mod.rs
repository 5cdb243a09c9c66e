//! CLI command handling
//!
//! Resolves configuration, dispatches commands and formats output.

use std::path::PathBuf;

use colored::Colorize;

use crate::commands::{Commands, OutputFormat};
use crate::common::config::Config;
use crate::common::paths;
use crate::common::{Error, Result};
use crate::contract;

/// Dispatch a CLI command
///
/// Returns whether the command succeeded; a run with failed steps is not an
/// `Err`, but it still has to end with a non-zero exit status.
pub async fn dispatch(command: Commands) -> Result<bool> {
    match command {
        Commands::Run {
            config,
            base_url,
            username,
            password,
            verify_deletion,
            format,
        } => {
            let mut cfg = Config::resolve(config.as_deref())?;
            apply_overrides(&mut cfg, base_url, username, password, verify_deletion);

            let report = contract::run_contract(&cfg, format == OutputFormat::Human).await?;

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }

            Ok(report.passed())
        }

        Commands::Steps { verify_deletion } => {
            for (i, step) in contract::plan(verify_deletion).iter().enumerate() {
                println!(
                    "{:>2}. {:<28} {}",
                    i + 1,
                    step.name().bold(),
                    step.contract().dimmed()
                );
            }
            Ok(true)
        }

        Commands::Config { config } => {
            let location = match &config {
                Some(path) => Some(path.clone()),
                None => paths::config_path(),
            };
            show_config(location, Config::resolve(config.as_deref())?)?;
            Ok(true)
        }
    }
}

/// Command-line values win over the config file
pub fn apply_overrides(
    cfg: &mut Config,
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    verify_deletion: bool,
) {
    if let Some(url) = base_url {
        cfg.target.base_url = url;
    }
    if let Some(user) = username {
        cfg.credentials.username = user;
    }
    if let Some(pass) = password {
        cfg.credentials.password = pass;
    }
    if verify_deletion {
        cfg.fixtures.verify_deletion = true;
    }
}

fn show_config(location: Option<PathBuf>, cfg: Config) -> Result<()> {
    match location {
        Some(path) if path.exists() => println!("Config file: {}", path.display()),
        Some(path) => println!("Config file: {} (not found, using defaults)", path.display()),
        None => {
            return Err(Error::Config(
                "could not determine a config directory on this platform".to_string(),
            ))
        }
    }
    println!();
    print!("{}", cfg.redacted_toml()?);
    Ok(())
}
