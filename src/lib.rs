//! Controls Merge Library
//!
//! Extracts the `controls` (keybinds) section from a settings JSON export and
//! merges it into another export without touching anything else.

pub mod cli;
pub mod config;
pub mod controls;
pub mod document;
pub mod error;
pub mod format;

/// Key of the settings field that extraction and merging operate on.
pub const CONTROLS_FIELD: &str = "controls";

pub use controls::{Pipeline, extract, extract_controls, merge, merge_controls, validate};
pub use error::{ControlsError, ControlsResult, ErrorCode, FieldError, ParseError, Role};
