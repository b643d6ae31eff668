//! CLI for the weekly report.
//!
//! Collects the user's closed and upcoming GitLab issues, links them to open
//! merge requests, and mails the resulting report.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use weekly_report::{RunSummary, Runner, RunnerConfig, RunnerError};

/// Weekly Report - Mail a summary of your GitLab issues and merge requests.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file [default: ~/.config/weekly-report.toml].
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitLab personal access token, overriding the configuration file.
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Print the report instead of sending it.
    #[arg(long)]
    dry_run: bool,

    /// Skip the interactive "Main difficulties" prompt.
    #[arg(long)]
    no_difficulties: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Both reqwest and lettre pull in rustls; pin one process-wide provider.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Critical failure, no report sent");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let config = RunnerConfig::new(args.config, args.dry_run)
        .with_token(args.token)
        .with_difficulties_prompt(!args.no_difficulties);
    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Closed issues: {}", summary.closed_issues);
    println!("  Issues due this week: {}", summary.due_issues);
    println!("  Projects: {}", summary.projects);
    println!("  Merge requests linked: {}", summary.merge_requests_linked);
    println!("  Difficulties: {}", summary.difficulties);

    if !summary.dry_run {
        println!("  Sent: {}", if summary.sent { "yes" } else { "no" });
    }
}
