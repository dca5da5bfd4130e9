//! Extract subcommand for controls-merge CLI
//!
//! Reduces a settings export to a document holding only its controls.

use super::OutputArgs;
use super::io::{InputSource, write_output};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use tracing::info;

/// Arguments for the extract subcommand
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Settings file to take the controls from (`-` for stdin)
    #[arg(value_name = "SOURCE")]
    pub source: InputSource,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the extract subcommand.
pub fn run_extract(config: &Config, args: &ExtractArgs) -> Result<()> {
    let pipeline = config.pipeline().with_output(args.output.resolve(config));
    let source_text = args.source.read()?;

    let reduced = pipeline.extract_controls(&source_text)?;
    write_output(args.output.output.as_deref(), &reduced)?;

    info!(source = %args.source, "extracted controls");
    Ok(())
}
