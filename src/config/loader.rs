//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading assistant
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{AssistError, AssistResult};

use super::types::{AssistConfig, KeywordConfig, RouteConfig, TimingConfig};

/// Loads and provides access to the assistant configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/assist/
/// ├── keywords.yaml   # Keyword tables and confidence weights
/// ├── routes.yaml     # Module and sync-page routes
/// └── timings.yaml    # Execution engine timing constants
/// ```
///
/// `timings.yaml` is optional; missing timing fields fall back to the
/// built-in defaults.
///
/// # Example
///
/// ```no_run
/// use tally_assist::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/assist").unwrap();
/// assert!(!loader.config().keywords().modules.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AssistConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `keywords.yaml` or `routes.yaml` is missing or
    /// contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> AssistResult<Self> {
        let path = path.as_ref();

        let keywords = Self::load_yaml::<KeywordConfig>(&path.join("keywords.yaml"))?;
        let routes = Self::load_yaml::<RouteConfig>(&path.join("routes.yaml"))?;

        // Timings are optional; absent file means built-in defaults.
        let timings_path = path.join("timings.yaml");
        let timings = if timings_path.exists() {
            Self::load_yaml::<TimingConfig>(&timings_path)?
        } else {
            TimingConfig::default()
        };

        Ok(Self {
            config: AssistConfig::new(keywords, routes, timings),
        })
    }

    /// Creates a loader carrying the built-in default configuration,
    /// without touching the filesystem.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> AssistResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AssistError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| AssistError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AssistConfig {
        &self.config
    }
}
