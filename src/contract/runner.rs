//! Contract runner implementation
//!
//! Logs in once, walks the step plan in order against a single
//! [`RunContext`], and releases the client when the last step is done.

use std::time::Instant;

use colored::Colorize;
use tracing::{info, warn};

use crate::api::StoryClient;
use crate::common::config::Config;
use crate::common::Result;

use super::context::RunContext;
use super::report::{RunReport, StepReport};
use super::steps::{plan, Step};

/// Run the full plan described by `config`
///
/// Returns `Err` only for fatal setup failures (bad config, no token). Step
/// failures are recorded in the report and never stop later steps.
pub async fn run_contract(config: &Config, echo: bool) -> Result<RunReport> {
    config.validate()?;
    let steps = plan(config.fixtures.verify_deletion);

    if echo {
        println!(
            "\n{} {}",
            "Running contract:".blue().bold(),
            config.target.base_url.white().bold()
        );
        println!("\n{}", "Setup:".cyan());
    }

    let client = StoryClient::connect(config).await?;
    if echo {
        println!(
            "  {} Authenticated as {}",
            "✓".green(),
            config.credentials.username.dimmed()
        );
        println!("\n{}", "Steps:".cyan());
    }

    let mut ctx = RunContext::new(client, config.fixtures.clone());
    let report = run_steps(&steps, &mut ctx, echo).await;

    // Teardown runs whatever the step outcomes were
    ctx.into_client().close();

    info!(
        passed = report.passed_count(),
        failed = report.failed_count(),
        "contract run finished"
    );

    if echo {
        print_summary(&report);
    }

    Ok(report)
}

/// Execute `steps` in order against `ctx`
pub async fn run_steps(steps: &[Box<dyn Step>], ctx: &mut RunContext, echo: bool) -> RunReport {
    let mut report = RunReport::new(ctx.client().base_url().as_str());

    for (i, step) in steps.iter().enumerate() {
        let index = i + 1;
        let started = Instant::now();
        let outcome = step.run(ctx).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let error = match outcome {
            Ok(()) => {
                info!(step = step.name(), index, elapsed_ms, "step passed");
                if echo {
                    println!(
                        "  {} Step {}: {}",
                        "✓".green(),
                        index,
                        step.name().dimmed()
                    );
                }
                None
            }
            Err(e) => {
                warn!(step = step.name(), index, error = %e, "step failed");
                if echo {
                    println!("  {} Step {}: {}: {}", "✗".red(), index, step.name(), e);
                }
                Some(e.to_string())
            }
        };

        report.steps.push(StepReport {
            index,
            name: step.name().to_string(),
            contract: step.contract().to_string(),
            passed: error.is_none(),
            error,
            elapsed_ms,
        });
    }

    report
}

fn print_summary(report: &RunReport) {
    if report.passed() {
        println!(
            "\n{} {}\n",
            "✓".green().bold(),
            format!("All {} steps passed", report.steps.len()).green().bold()
        );
    } else {
        println!(
            "\n{} {}\n",
            "✗".red().bold(),
            format!(
                "{} of {} steps failed",
                report.failed_count(),
                report.steps.len()
            )
            .red()
            .bold()
        );
    }
}
