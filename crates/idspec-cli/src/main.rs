//! # idspec CLI entry point
//!
//! Parses command-line arguments, initialises logging, resolves the
//! repository root and configuration, and dispatches to the subcommand.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use idspec_cli::config::ValidatorConfig;
use idspec_cli::validate::{run_validate, ValidateArgs};
use idspec_cli::{find_repo_root, EXIT_FATAL};

/// Identity spec validator.
///
/// Checks every identity-spec document against the identity-spec JSON
/// Schema and exits non-zero if any document is invalid.
#[derive(Parser, Debug)]
#[command(name = "idspec", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate identity-spec documents against the schema.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(cli.verbose))
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    match dispatch(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn dispatch(cli: Cli) -> Result<u8> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let repo_root = find_repo_root(&cwd).unwrap_or_else(|| {
        tracing::warn!("Could not locate repository root; using current directory");
        cwd.clone()
    });
    tracing::debug!(repo_root = %repo_root.display(), "resolved repository root");

    let config = ValidatorConfig::load(cli.config.as_deref(), &repo_root)?;

    match cli.command {
        Commands::Validate(args) => run_validate(&args, config, &repo_root),
    }
}

fn filter_for(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}
