//! Configuration for the command-line shell.
//!
//! Consolidates configuration from tiers with field-by-field YAML merging:
//! 1. **Defaults** - built in
//! 2. **Project** - `$CWD/controls-merge/config.yaml`
//! 3. **User** - `~/.controls-merge/config.yaml`
//! 4. **Environment** - variables below
//!
//! ## Environment Variables
//! - `CONTROLS_MERGE_CONFIG_PATH` - Explicit config file (replaces tiers 1-3)
//! - `CONTROLS_MERGE_PROJECT_DIR` - Project config dir (default: `./controls-merge`)
//! - `CONTROLS_MERGE_USER_DIR` - User config dir (default: `~/.controls-merge`)
//! - `CONTROLS_MERGE_OUTPUT_STYLE` - `pretty` or `compact`
//! - `CONTROLS_MERGE_INDENT` - Spaces per indentation level
//! - `CONTROLS_MERGE_MAX_BYTES` - Largest accepted input
//! - `CONTROLS_MERGE_MAX_DEPTH` - Deepest accepted nesting
//!
//! The controls field name itself is fixed and not configurable.

mod loader;
mod merge;
mod types;

pub use loader::{
    CONFIG_FILE_NAME, ConfigLoader, ConfigPaths, ConfigTier, ENV_CONFIG_PATH, ENV_INDENT,
    ENV_MAX_BYTES, ENV_MAX_DEPTH, ENV_OUTPUT_STYLE, ENV_PROJECT_DIR, ENV_USER_DIR,
};
pub use merge::{deep_merge, deep_merge_all};
pub use types::Config;
