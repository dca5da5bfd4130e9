//! Configuration types.

use crate::controls::Pipeline;
use crate::document::ParseLimits;
use crate::format::OutputOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Command-line shell configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// How results are written.
    #[serde(default)]
    pub output: OutputOptions,

    /// Bounds on input documents.
    #[serde(default)]
    pub limits: ParseLimits,
}

impl Config {
    /// Load a single YAML config file, filling unset fields with defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parse YAML config text. Empty text yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// The operations configured by this config.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.limits, self.output)
    }
}
