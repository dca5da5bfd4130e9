//! Configuration loader with tier-based merging.
//!
//! Loads configuration from multiple tiers and merges them field-by-field.

use super::merge::deep_merge_all;
use super::types::Config;
use crate::format::OutputStyle;
use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "CONTROLS_MERGE_CONFIG_PATH";
pub const ENV_PROJECT_DIR: &str = "CONTROLS_MERGE_PROJECT_DIR";
pub const ENV_USER_DIR: &str = "CONTROLS_MERGE_USER_DIR";
pub const ENV_OUTPUT_STYLE: &str = "CONTROLS_MERGE_OUTPUT_STYLE";
pub const ENV_INDENT: &str = "CONTROLS_MERGE_INDENT";
pub const ENV_MAX_BYTES: &str = "CONTROLS_MERGE_MAX_BYTES";
pub const ENV_MAX_DEPTH: &str = "CONTROLS_MERGE_MAX_DEPTH";

/// Name of the config file looked up in each directory tier.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults
    Defaults = 0,
    /// Project-level config ($CWD/controls-merge/)
    Project = 1,
    /// User-level config (~/.controls-merge/)
    User = 2,
    /// Environment variables
    Environment = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Directories searched for `config.yaml`.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub project_dir: Option<PathBuf>,
    pub user_dir: Option<PathBuf>,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigPaths {
    /// Discover configuration directories from environment and defaults.
    pub fn discover() -> Self {
        let project_dir = std::env::var(ENV_PROJECT_DIR)
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("controls-merge")));

        let user_dir = std::env::var(ENV_USER_DIR)
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".controls-merge")));

        Self {
            project_dir,
            user_dir,
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            user_dir,
        }
    }

    /// Config files that exist, lowest priority first.
    fn existing_files(&self) -> Vec<(ConfigTier, PathBuf)> {
        [
            (ConfigTier::Project, self.project_dir.as_ref()),
            (ConfigTier::User, self.user_dir.as_ref()),
        ]
        .into_iter()
        .filter_map(|(tier, dir)| dir.map(|d| (tier, d.join(CONFIG_FILE_NAME))))
        .filter(|(_, file)| file.is_file())
        .collect()
    }
}

/// Configuration loader that handles tier-based merging.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Paths for each tier
    pub paths: ConfigPaths,
    /// Loaded configuration
    config: Config,
    /// Config files that contributed, lowest priority first
    sources: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration from all tiers, honouring `CONTROLS_MERGE_CONFIG_PATH`.
    pub fn load() -> Result<Self> {
        match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) => Self::load_explicit(Path::new(&path)),
            Err(_) => Self::load_with_paths(ConfigPaths::discover()),
        }
    }

    /// Load a single config file, skipping tier discovery.
    ///
    /// Environment overrides still apply on top.
    pub fn load_explicit(path: &Path) -> Result<Self> {
        let mut config = Config::load(path)?;
        apply_overrides(&mut config, env_lookup);
        Ok(Self {
            paths: ConfigPaths::with_dirs(None, None),
            config,
            sources: vec![path.to_path_buf()],
        })
    }

    /// Load configuration with explicit tier directories.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        Self::load_with_lookup(paths, env_lookup)
    }

    /// Load with explicit tier directories and a custom variable lookup.
    pub fn load_with_lookup(
        paths: ConfigPaths,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut tiers: Vec<Value> = vec![serde_json::to_value(Config::default())?];
        let mut sources = Vec::new();
        debug!(tier = %ConfigTier::Defaults, "starting from built-in config");

        for (tier, file) in paths.existing_files() {
            match read_yaml(&file) {
                Ok(value) => {
                    debug!(%tier, path = %file.display(), "loaded config tier");
                    tiers.push(value);
                    sources.push(file);
                }
                Err(e) => {
                    warn!(%tier, path = %file.display(), "ignoring unreadable config: {}", e);
                }
            }
        }

        let merged = deep_merge_all(tiers);
        let mut config: Config = serde_json::from_value(merged)?;
        apply_overrides(&mut config, lookup);

        Ok(Self {
            paths,
            config,
            sources,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Config files that were merged, lowest priority first.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn read_yaml(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_yaml::from_str(&content)?;
    Ok(value)
}

/// Apply environment-tier overrides. Unparseable values are logged and skipped.
///
/// Returns the variables that took effect.
fn apply_overrides(
    config: &mut Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<&'static str> {
    let mut applied = Vec::new();

    if let Some(style) = lookup(ENV_OUTPUT_STYLE) {
        match OutputStyle::from_str(&style) {
            Some(style) => {
                config.output.style = style;
                applied.push(ENV_OUTPUT_STYLE);
            }
            None => warn!("ignoring {}={:?}: expected pretty or compact", ENV_OUTPUT_STYLE, style),
        }
    }

    if let Some(indent) = parse_number(&lookup, ENV_INDENT) {
        config.output.indent = indent;
        applied.push(ENV_INDENT);
    }
    if let Some(max_bytes) = parse_number(&lookup, ENV_MAX_BYTES) {
        config.limits.max_bytes = max_bytes;
        applied.push(ENV_MAX_BYTES);
    }
    if let Some(max_depth) = parse_number(&lookup, ENV_MAX_DEPTH) {
        config.limits.max_depth = max_depth;
        applied.push(ENV_MAX_DEPTH);
    }

    if !applied.is_empty() {
        debug!(tier = %ConfigTier::Environment, vars = ?applied, "applied config overrides");
    }
    applied
}

fn parse_number(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<usize> {
    let raw = lookup(name)?;
    match raw.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("ignoring {}={:?}: expected a non-negative integer", name, raw);
            None
        }
    }
}
