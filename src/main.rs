//! controls-merge
//!
//! Command-line shell around the controls extraction and merge library.

use anyhow::Result;
use clap::Parser;
use controls_merge::ControlsError;
use controls_merge::cli::extract::run_extract;
use controls_merge::cli::merge::run_merge;
use controls_merge::cli::validate::run_validate;
use controls_merge::cli::{Cli, Command, EXIT_ERROR, EXIT_SUCCESS, exit_code_for, parse_exit_code};
use controls_merge::config::ConfigLoader;
use std::fs::OpenOptions;
use std::process::ExitCode;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let _ = e.print();
            return ExitCode::from(parse_exit_code(&e));
        }
    };

    if let Err(e) = init_logging(&cli) {
        eprintln!("error: failed to initialize logging: {:#}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {:#}", e);
            let code = match e.downcast_ref::<ControlsError>() {
                Some(err) => exit_code_for(err.code()),
                None => EXIT_ERROR,
            };
            ExitCode::from(code)
        }
    }
}

/// Install the tracing subscriber selected by `--log`.
///
/// `RUST_LOG` takes precedence over the level implied by `--verbose`.
fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()))
    };

    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::load_explicit(path)?,
        None => ConfigLoader::load()?,
    };
    for source in loader.sources() {
        debug!(path = %source.display(), "using config file");
    }
    let config = loader.into_config();

    match &cli.command {
        Command::Extract(args) => run_extract(&config, args),
        Command::Merge(args) => run_merge(&config, args),
        Command::Validate(args) => run_validate(&config, args),
    }
}
