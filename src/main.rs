//! Story Spoiler API contract runner
//!
//! Logs in, then creates, edits, lists and deletes a story, checking every
//! documented success and failure response along the way.

use clap::Parser;
use story_contract::commands::Commands;
use story_contract::{cli, common::logging};

#[derive(Parser)]
#[command(name = "story-contract", about = "Ordered contract checks for the Story API")]
#[command(version, long_about = None)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_cli(cli.verbose);

    match cli::dispatch(cli.command).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) if e.is_fatal() => {
            eprintln!("Error: {e}");
            eprintln!("Setup failed; no contract steps were run.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
