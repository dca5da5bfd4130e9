//! Output formatting for JSON documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Default number of spaces per indentation level.
pub const DEFAULT_INDENT: usize = 2;

/// Layout of formatted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// One key per line, indented.
    #[default]
    Pretty,
    /// Minified, no insignificant whitespace.
    Compact,
}

impl OutputStyle {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(OutputStyle::Pretty),
            "compact" | "minified" | "min" => Some(OutputStyle::Compact),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputStyle::Pretty => write!(f, "pretty"),
            OutputStyle::Compact => write!(f, "compact"),
        }
    }
}

/// Style plus indent width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    #[serde(default)]
    pub style: OutputStyle,
    /// Spaces per level; ignored for compact output.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            style: OutputStyle::Pretty,
            indent: DEFAULT_INDENT,
        }
    }
}

impl OutputOptions {
    pub fn compact() -> Self {
        Self {
            style: OutputStyle::Compact,
            ..Self::default()
        }
    }
}

/// Serialize `value` to text.
///
/// Keys come out in the value's own iteration order, which is the order they
/// were parsed in. Non-ASCII characters are written as-is.
pub fn format(value: &Value, options: &OutputOptions) -> String {
    match options.style {
        OutputStyle::Compact => value.to_string(),
        OutputStyle::Pretty => format_indented(value, options.indent),
    }
}

fn format_indented(value: &Value, indent: usize) -> String {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    // A Value holds only string keys, so writing it into memory does not fail
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
