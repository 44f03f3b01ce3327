//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the regime
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{RegimeConfig, RegimeMetadata, StatutoryMinimums, SuspensionConfig};

/// Loads and provides access to the regime configuration.
///
/// # Directory Structure
///
/// ```text
/// config/prescrizione/
/// ├── regime.yaml       # Regime metadata
/// ├── minimums.yaml     # Statutory minimums by offense category
/// └── suspensions.yaml  # COVID and Orlando suspensions
/// ```
///
/// # Example
///
/// ```no_run
/// use prescrizione_engine::config::ConfigLoader;
/// use prescrizione_engine::models::OffenseCategory;
///
/// let loader = ConfigLoader::load("./config/prescrizione").unwrap();
/// println!("Loaded regime: {}", loader.regime().name);
/// let minimums = loader.config().minimums();
/// println!("Delitto minimum: {} years", minimums.years_for(OffenseCategory::Delitto));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RegimeConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The Orlando window ends before it starts
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegimeMetadata>(&path.join("regime.yaml"))?;
        let minimums = Self::load_yaml::<StatutoryMinimums>(&path.join("minimums.yaml"))?;

        let suspensions_path = path.join("suspensions.yaml");
        let suspensions = Self::load_yaml::<SuspensionConfig>(&suspensions_path)?;
        Self::check_orlando_window(&suspensions, &suspensions_path)?;

        Ok(Self {
            config: RegimeConfig::new(metadata, minimums, suspensions),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: RegimeConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_orlando_window(suspensions: &SuspensionConfig, path: &Path) -> EngineResult<()> {
        let orlando = &suspensions.orlando;
        if orlando.end_date < orlando.start_date {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!(
                    "orlando window ends ({}) before it starts ({})",
                    orlando.end_date, orlando.start_date
                ),
            });
        }
        Ok(())
    }

    /// Returns the underlying regime configuration.
    pub fn config(&self) -> &RegimeConfig {
        &self.config
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        self.config.metadata()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_config(RegimeConfig::default())
    }
}
