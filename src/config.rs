//! Command-line configuration
//!
//! Loaded from `schemer.toml`. Every key is optional; command-line flags
//! take precedence over the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{SchemerError, SchemerResult};
use crate::transpiler::Dialect;

/// File name searched for in the working directory and the user config dir.
pub const CONFIG_FILE: &str = "schemer.toml";

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Target dialect name
    pub dialect: Option<String>,

    /// Write DDL here instead of stdout
    pub output: Option<PathBuf>,

    /// Log filter directive, e.g. `info` or `schemer=trace`
    pub log_level: Option<String>,
}

impl Config {
    /// Create a new configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse configuration text.
    pub fn from_toml(content: &str) -> SchemerResult<Self> {
        toml::from_str(content).map_err(|e| SchemerError::Config(e.to_string()))
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> SchemerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemerError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| SchemerError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `./schemer.toml`, then
    /// `<config dir>/schemer/schemer.toml`, then defaults.
    pub fn load(explicit: Option<&Path>) -> SchemerResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Candidate config files, in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("schemer").join(CONFIG_FILE));
        }
        paths
    }

    /// Resolve the target dialect: `cli` wins over the file. No fallback.
    pub fn resolve_dialect(&self, cli: Option<&str>) -> SchemerResult<Dialect> {
        match cli.or(self.dialect.as_deref()) {
            Some(name) => name.parse(),
            None => Err(SchemerError::Config(
                "no dialect selected; pass --dialect, set SCHEMER_DIALECT, or add `dialect` to schemer.toml"
                    .to_string(),
            )),
        }
    }
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the dialect
    pub fn dialect(mut self, name: impl Into<String>) -> Self {
        self.config.dialect = Some(name.into());
        self
    }

    /// Set the output path
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = Some(path.into());
        self
    }

    /// Set the log filter
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = Some(level.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}
