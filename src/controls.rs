//! Extraction and merging of the controls field.
//!
//! [`extract`] and [`merge`] work on parsed values; [`Pipeline`] and the free
//! functions below wrap them into text-in/text-out operations.

use crate::CONTROLS_FIELD;
use crate::document::{ParseLimits, has_field, json_kind};
use crate::error::{ControlsError, ControlsResult, FieldError, Role};
use crate::format::{OutputOptions, format};
use serde_json::{Map, Value};
use tracing::debug;

/// Reduce a settings document to just its controls.
///
/// Returns a new object holding only the `controls` key. The controls value
/// itself is copied verbatim. Extracting an already reduced document yields an
/// identical document.
pub fn extract(source: &Value) -> Result<Value, FieldError> {
    let Some(controls) = source.as_object().and_then(|map| map.get(CONTROLS_FIELD)) else {
        debug!(kind = json_kind(source), "no controls field to extract");
        return Err(FieldError::MissingControls);
    };

    let mut reduced = Map::with_capacity(1);
    reduced.insert(CONTROLS_FIELD.to_string(), controls.clone());
    Ok(Value::Object(reduced))
}

/// Replace the controls of `target` with the controls of `source`.
///
/// `source` may be a full settings document or a reduced one. Checks run in
/// order and stop at the first failure: the target must be an object, then the
/// source must be an object with a controls field.
///
/// The result keeps every other key of `target` in its original position. If
/// `target` had no controls field, it is appended last.
pub fn merge(source: &Value, target: &Value) -> Result<Value, FieldError> {
    let Some(target_map) = target.as_object() else {
        debug!(kind = json_kind(target), "merge target is not an object");
        return Err(FieldError::TargetNotObject);
    };

    let Some(controls) = source.as_object().and_then(|map| map.get(CONTROLS_FIELD)) else {
        debug!(kind = json_kind(source), "merge source has no controls field");
        return Err(FieldError::SourceMissingControls);
    };

    let replaced = has_field(target, CONTROLS_FIELD);
    let mut merged = target_map.clone();
    merged.insert(CONTROLS_FIELD.to_string(), controls.clone());
    debug!(keys = merged.len(), replaced, "merged controls into target");
    Ok(Value::Object(merged))
}

/// Text-in/text-out operations with a fixed set of limits and output options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pipeline {
    pub limits: ParseLimits,
    pub output: OutputOptions,
}

impl Pipeline {
    pub fn new(limits: ParseLimits, output: OutputOptions) -> Self {
        Self { limits, output }
    }

    pub fn with_output(mut self, output: OutputOptions) -> Self {
        self.output = output;
        self
    }

    pub fn with_limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    fn parse(&self, role: Role, text: &str) -> ControlsResult<Value> {
        self.limits
            .parse(text)
            .map_err(|error| ControlsError::parse(role, error))
    }

    /// Parse `source_text` and return its controls-only document as text.
    pub fn extract_controls(&self, source_text: &str) -> ControlsResult<String> {
        let source = self.parse(Role::Source, source_text)?;
        let reduced = extract(&source)?;
        Ok(format(&reduced, &self.output))
    }

    /// Parse both documents and return the target with the source's controls.
    ///
    /// The source is parsed first, so when both texts are invalid the source
    /// error is the one reported.
    pub fn merge_controls(&self, source_text: &str, target_text: &str) -> ControlsResult<String> {
        let source = self.parse(Role::Source, source_text)?;
        let target = self.parse(Role::Target, target_text)?;
        let merged = merge(&source, &target)?;
        Ok(format(&merged, &self.output))
    }

    /// Check that `text` is JSON of any shape and return it reformatted.
    pub fn validate(&self, text: &str) -> ControlsResult<String> {
        let value = self.parse(Role::Input, text)?;
        Ok(format(&value, &self.output))
    }
}

/// [`Pipeline::extract_controls`] with default limits and pretty output.
pub fn extract_controls(source_text: &str) -> ControlsResult<String> {
    Pipeline::default().extract_controls(source_text)
}

/// [`Pipeline::merge_controls`] with default limits and pretty output.
pub fn merge_controls(source_text: &str, target_text: &str) -> ControlsResult<String> {
    Pipeline::default().merge_controls(source_text, target_text)
}

/// [`Pipeline::validate`] with default limits and pretty output.
pub fn validate(text: &str) -> ControlsResult<String> {
    Pipeline::default().validate(text)
}
