//! Merge subcommand for controls-merge CLI
//!
//! Copies the controls of one settings export into another.

use super::OutputArgs;
use super::io::{InputSource, write_output};
use crate::config::Config;
use anyhow::{Result, bail};
use clap::Args;
use tracing::info;

/// Arguments for the merge subcommand
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Settings or controls-only file holding the wanted controls (`-` for stdin)
    #[arg(value_name = "SOURCE")]
    pub source: InputSource,

    /// Settings file to receive the controls (`-` for stdin)
    #[arg(value_name = "TARGET")]
    pub target: InputSource,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl MergeArgs {
    /// Stdin can only be consumed once.
    pub fn check_inputs(&self) -> Result<()> {
        if self.source.is_stdin() && self.target.is_stdin() {
            bail!("SOURCE and TARGET cannot both be read from stdin");
        }
        Ok(())
    }
}

/// Run the merge subcommand.
pub fn run_merge(config: &Config, args: &MergeArgs) -> Result<()> {
    args.check_inputs()?;
    let pipeline = config.pipeline().with_output(args.output.resolve(config));
    let source_text = args.source.read()?;
    let target_text = args.target.read()?;

    let merged = pipeline.merge_controls(&source_text, &target_text)?;
    write_output(args.output.output.as_deref(), &merged)?;

    info!(source = %args.source, target = %args.target, "merged controls");
    Ok(())
}
