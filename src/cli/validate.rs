//! Validate subcommand for controls-merge CLI
//!
//! Checks that a document is JSON and prints it reformatted.

use super::OutputArgs;
use super::io::{InputSource, write_output};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use tracing::info;

/// Arguments for the validate subcommand
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON file to check (`-` for stdin)
    #[arg(value_name = "FILE")]
    pub input: InputSource,

    /// Only report whether the file is valid; do not print it
    #[arg(long, conflicts_with_all = ["compact", "pretty", "indent"])]
    pub check: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the validate subcommand.
pub fn run_validate(config: &Config, args: &ValidateArgs) -> Result<()> {
    let pipeline = config.pipeline().with_output(args.output.resolve(config));
    let text = args.input.read()?;

    let formatted = pipeline.validate(&text)?;
    let report = if args.check {
        format!("{}: valid JSON", args.input)
    } else {
        formatted
    };
    write_output(args.output.output.as_deref(), &report)?;

    info!(input = %args.input, "validated document");
    Ok(())
}
