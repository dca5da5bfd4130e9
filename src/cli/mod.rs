//! CLI command definitions for controls-merge
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod extract;
pub mod io;
pub mod merge;
pub mod validate;

use crate::config::Config;
use crate::error::ErrorCode;
use crate::format::{OutputOptions, OutputStyle};
use clap::{Args, Parser, Subcommand};
use extract::ExtractArgs;
use merge::MergeArgs;
use std::path::PathBuf;
use validate::ValidateArgs;

/// Success.
pub const EXIT_SUCCESS: u8 = 0;
/// I/O, config, or other unspecified failure.
pub const EXIT_ERROR: u8 = 1;
/// Bad arguments (reported by clap).
pub const EXIT_USAGE: u8 = 2;
/// An input document is not valid JSON.
pub const EXIT_PARSE: u8 = 3;
/// An input document lacks the required shape.
pub const EXIT_FIELD: u8 = 4;

/// Exit code for a failed controls operation.
pub fn exit_code_for(code: ErrorCode) -> u8 {
    if code.is_parse() { EXIT_PARSE } else { EXIT_FIELD }
}

/// Exit code for a command line clap refused to parse.
///
/// Help and version output are not failures.
pub fn parse_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS }
}

/// Extract and merge the controls (keybinds) section of settings JSON exports
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reduce a settings file to only its controls section
    Extract(ExtractArgs),

    /// Copy the controls of SOURCE into TARGET, keeping everything else
    Merge(MergeArgs),

    /// Check that a file is valid JSON and pretty-print it
    Validate(ValidateArgs),
}

/// Output options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write the result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write minified JSON
    #[arg(long, conflicts_with = "pretty")]
    pub compact: bool,

    /// Write indented JSON (overrides a compact config)
    #[arg(long)]
    pub pretty: bool,

    /// Spaces per indentation level
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,
}

impl OutputArgs {
    /// Config output options with command-line flags applied on top.
    pub fn resolve(&self, config: &Config) -> OutputOptions {
        let mut options = config.output;
        if self.compact {
            options.style = OutputStyle::Compact;
        }
        if self.pretty {
            options.style = OutputStyle::Pretty;
        }
        if let Some(indent) = self.indent {
            options.indent = indent;
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_merge_with_globals() {
        let cli = Cli::try_parse_from([
            "controls-merge",
            "merge",
            "src.json",
            "dst.json",
            "--compact",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Merge(args) => {
                assert_eq!(args.source.to_string(), "src.json");
                assert_eq!(args.target.to_string(), "dst.json");
                assert!(args.output.compact);
            }
            other => panic!("expected merge, got {:?}", other),
        }
    }

    #[test]
    fn test_compact_conflicts_with_pretty() {
        assert!(
            Cli::try_parse_from(["controls-merge", "extract", "a.json", "--compact", "--pretty"])
                .is_err()
        );
    }

    #[test]
    fn test_output_args_override_config() {
        let config = Config::from_yaml("output:\n  style: compact\n  indent: 3\n").unwrap();
        let args = OutputArgs {
            pretty: true,
            indent: Some(6),
            ..OutputArgs::default()
        };
        let options = args.resolve(&config);
        assert_eq!(options.style, OutputStyle::Pretty);
        assert_eq!(options.indent, 6);

        let options = OutputArgs::default().resolve(&config);
        assert_eq!(options.style, OutputStyle::Compact);
        assert_eq!(options.indent, 3);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(ErrorCode::EmptyInput), EXIT_PARSE);
        assert_eq!(exit_code_for(ErrorCode::TargetNotObject), EXIT_FIELD);
    }

    #[test]
    fn test_parse_exit_codes() {
        let err = Cli::try_parse_from(["controls-merge", "merge", "only-one.json"]).unwrap_err();
        assert_eq!(parse_exit_code(&err), EXIT_USAGE);

        let err = Cli::try_parse_from(["controls-merge", "--help"]).unwrap_err();
        assert_eq!(parse_exit_code(&err), EXIT_SUCCESS);
    }
}
