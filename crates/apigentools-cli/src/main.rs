//! apigentools - tooling around generated API clients
//!
//! ## Commands
//!
//! - `test`: build and run the generated test Dockerfile for every
//!   configured (language, spec version) pair

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};

use apigentools_core::{current_commit, is_git_repo, Config};
use apigentools_test::{
    CliContainerEngine, RunReport, TargetOutcome, TestOptions, TestRunner,
    DEFAULT_CONTAINER_BINARY,
};

#[derive(Parser)]
#[command(name = "apigentools")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tooling around generated API clients", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and run test images for all configured languages
    Test {
        /// Directory containing config.json
        #[arg(
            short,
            long,
            env = "APIGENTOOLS_CONFIG_DIR",
            default_value = "config"
        )]
        config_dir: PathBuf,

        /// Directory with the generated per-language output
        #[arg(
            short,
            long,
            env = "APIGENTOOLS_GENERATED_CODE_DIR",
            default_value = "generated"
        )]
        generated_code_dir: PathBuf,

        /// Build test images without the container build cache
        #[arg(long)]
        no_cache: bool,

        /// Container CLI used to build and run test images
        #[arg(
            long,
            env = "APIGENTOOLS_CONTAINER_BINARY",
            default_value = DEFAULT_CONTAINER_BINARY
        )]
        container_binary: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    apigentools_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Test {
            config_dir,
            generated_code_dir,
            no_cache,
            container_binary,
        } => {
            let status = cmd_test(&config_dir, &generated_code_dir, no_cache, &container_binary)
                .await?;
            Ok(ExitCode::from(status as u8))
        }
    }
}

/// Run the `test` command and return its aggregate status (the process
/// exit code: 0 when every target passed or was skipped, 1 otherwise).
async fn cmd_test(
    config_dir: &Path,
    generated_code_dir: &Path,
    no_cache: bool,
    container_binary: &str,
) -> Result<i32> {
    let config = Config::from_dir(config_dir).context("Failed to load apigentools config")?;

    if is_git_repo(Path::new(".")) {
        match current_commit(Path::new(".")) {
            Ok(sha) => info!(commit = %sha, "running tests"),
            Err(e) => debug!("could not determine current commit: {e}"),
        }
    }

    let engine = CliContainerEngine::new(container_binary);
    let options = TestOptions {
        generated_code_dir: generated_code_dir.to_path_buf(),
        no_cache,
    };

    let report = TestRunner::run(&config, &engine, &options)
        .await
        .context("Test run failed to execute")?;

    print_report(&report);

    Ok(report.exit_status())
}

fn print_report(report: &RunReport) {
    println!();
    for entry in &report.targets {
        let status = match &entry.outcome {
            TargetOutcome::Passed => "✓ passed".to_string(),
            TargetOutcome::Skipped => "- skipped (no Dockerfile)".to_string(),
            TargetOutcome::BuildFailed { exit_code } => {
                format!("✗ build failed (exit code: {exit_code})")
            }
            TargetOutcome::TestFailed { exit_code } => {
                format!("✗ tests failed (exit code: {exit_code})")
            }
        };
        println!(
            "  {} {} {}",
            entry.target.language, entry.target.version, status
        );
    }

    println!();
    println!("Started: {}", report.started_at.to_rfc3339());
    println!("Duration: {}ms", report.duration_ms);
    println!(
        "Summary: {} passed, {} failed, {} skipped",
        report.passed_count(),
        report.failed_count(),
        report.skipped_count()
    );
    println!(
        "Status: {}",
        if report.success() {
            "✓ PASSED"
        } else {
            "✗ FAILED"
        }
    );
}
