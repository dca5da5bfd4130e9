//! Parsing and shape checks for settings documents.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// Default maximum input size in bytes (16 MiB).
pub const DEFAULT_MAX_BYTES: usize = 16 * 1024 * 1024;

/// Default maximum nesting depth of arrays and objects.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Deepest nesting serde_json itself accepts; larger limits are capped here.
pub const PARSER_MAX_DEPTH: usize = 127;

/// Bounds applied to untrusted input before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseLimits {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_bytes() -> usize {
    DEFAULT_MAX_BYTES
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseLimits {
    /// Parse `text` as a JSON value of any shape.
    ///
    /// Whitespace-only text is reported as [`ParseError::Empty`], anything
    /// else that fails to parse as [`ParseError::Malformed`] with its position
    /// in the original text, surrounding whitespace included.
    pub fn parse(&self, text: &str) -> Result<Value, ParseError> {
        if text.len() > self.max_bytes {
            return Err(ParseError::TooLarge {
                len: text.len(),
                limit: self.max_bytes,
            });
        }

        if text.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        // Nesting is checked on the raw text so deep input never reaches the parser
        let limit = self.max_depth.min(PARSER_MAX_DEPTH);
        if exceeds_depth(text, limit) {
            return Err(ParseError::TooDeep { limit });
        }

        let value: Value = serde_json::from_str(text)?;
        trace!(kind = json_kind(&value), "parsed JSON document");
        Ok(value)
    }
}

/// Parse `text` with the default limits.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    ParseLimits::default().parse(text)
}

/// True only if `value` is an object that directly contains `name`.
pub fn has_field(value: &Value, name: &str) -> bool {
    value.as_object().is_some_and(|map| map.contains_key(name))
}

/// Name of the JSON type of `value`, for log events.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// True if brackets in `text` nest deeper than `limit`.
///
/// Brackets inside string literals are skipped. Stops at the first level past
/// the limit, so the scan is linear in the text read so far.
fn exceeds_depth(text: &str, limit: usize) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > limit {
                    return true;
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    false
}
