//! Config file for the explain CLI
//!
//! Read from `<config dir>/zqlz/explain.toml`:
//!
//! ```toml
//! max_depth = 128
//! pretty = true
//! log_filter = "warn,zqlz_explain=debug"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zqlz_explain::{DEFAULT_MAX_DEPTH, ParseOptions};

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    pub max_depth: usize,
    pub pretty: bool,
    pub log_filter: String,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            pretty: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ExplainConfig {
    /// Loads the config from `path`, or from the default location when `None`
    ///
    /// A missing file at the default location yields the defaults, an
    /// explicitly requested file must exist. Also returns the file that was
    /// read, if any, so it can be logged once logging is up.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (config_path()?, false),
        };

        if !required && !path.exists() {
            return Ok((Self::default(), None));
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok((config, Some(path)))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default().with_max_depth(self.max_depth)
    }
}

pub fn config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join("zqlz").join("explain.toml"))
}
