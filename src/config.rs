//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A TOML file: `--config PATH`, or `config.toml` in the platform config dir
//! 3. `DIRDUPE_*` environment variables (`DIRDUPE_RESIDUAL_THRESHOLD=1048576`)
//! 4. Command-line flags, applied by the caller

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::duplicates::clusters::{
    ClusterConfig, DEFAULT_MIN_PREFIX_PARTS, DEFAULT_RESIDUAL_THRESHOLD,
};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DIRDUPE_";

/// Errors from loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A layer could not be read or did not match the schema.
    #[error("Invalid configuration: {0}")]
    Figment(#[from] figment::Error),

    /// No cluster size was configured.
    #[error("At least one cluster size is required")]
    NoClusterSizes,

    /// A cluster size of zero was configured.
    #[error("Cluster sizes must be greater than zero")]
    ZeroClusterSize,

    /// `min_prefix_parts` was zero.
    #[error("min_prefix_parts must be at least 1")]
    ZeroPrefixParts,

    /// The configuration could not be rendered as TOML.
    #[error("Cannot render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cluster sizes to report wasted space for, in bytes.
    pub cluster_sizes: Vec<u64>,
    /// Minimum parts the first directory keeps after suffix compression.
    pub min_prefix_parts: usize,
    /// Wasted bytes above which an unclustered group is listed individually.
    pub residual_threshold: u64,
    /// Cap on individually listed groups (unlimited when absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,
    /// Seconds between load progress reports.
    pub progress_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cluster_sizes: vec![1, 4096],
            min_prefix_parts: DEFAULT_MIN_PREFIX_PARTS,
            residual_threshold: DEFAULT_RESIDUAL_THRESHOLD,
            max_entries: None,
            progress_interval_secs: 5 * 60,
        }
    }
}

impl Config {
    /// Build the layered figment without extracting it.
    ///
    /// `explicit` replaces the default config file location.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match explicit.map(Path::to_path_buf).or_else(Self::config_path) {
            Some(path) => {
                log::debug!("Config file: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => log::debug!("No config directory available"),
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a layer is malformed or a value is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Config = Self::figment(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cluster_sizes.is_empty() {
            return Err(ConfigError::NoClusterSizes);
        }
        if self.cluster_sizes.contains(&0) {
            return Err(ConfigError::ZeroClusterSize);
        }
        if self.min_prefix_parts == 0 {
            return Err(ConfigError::ZeroPrefixParts);
        }
        Ok(())
    }

    /// Clustering parameters.
    #[must_use]
    pub fn cluster_config(&self) -> ClusterConfig {
        ClusterConfig {
            min_prefix_parts: self.min_prefix_parts,
            residual_threshold: self.residual_threshold,
        }
    }

    /// Interval between load progress reports.
    #[must_use]
    pub fn progress_interval(&self) -> Duration {
        Duration::from_secs(self.progress_interval_secs)
    }

    /// Render the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Render`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "dirdupe", "dirdupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
