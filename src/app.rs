//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging (stderr, `RUST_LOG` aware)
//! - parses CLI arguments
//! - resolves settings from the environment and flags
//! - dispatches to one pipeline per subcommand

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::error::AppError;

pub mod pipeline;

use pipeline::RunContext;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("market_feeds=info"));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point for the `mkt` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();
    let cli = Cli::parse();

    let settings = Settings::from_env()?.with_overrides(cli.out_dir, cli.timeout)?;
    settings.log_redacted();

    if let Command::Check = cli.command {
        pipeline::run_check(&settings)?;
        return Ok(());
    }

    let ctx = RunContext::new(&settings)?;
    match cli.command {
        Command::Indicators => pipeline::run_indicators(&ctx).map(drop),
        Command::Global => pipeline::run_global(&ctx).map(drop),
        Command::Releases => pipeline::run_releases(&ctx).map(drop),
        Command::Calendar(args) => pipeline::run_calendar(&ctx, &args).map(drop),
        Command::Forecast(args) => pipeline::run_forecast(&ctx, args.major, &args.country).map(drop),
        Command::Investing(args) => pipeline::run_investing(&ctx, &args.countries).map(drop),
        Command::Yields(args) => pipeline::run_yields(&ctx, args.source, &args.countries).map(drop),
        Command::Markets => pipeline::run_markets(&ctx).map(drop),
        Command::Bonds => pipeline::run_bonds(&ctx).map(drop),
        Command::Check => Ok(()),
    }
}
