//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading advisor
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AdvisorConfig, BenchmarksConfig, ColumnKind, ColumnSchema, MarketBenchmark, Settings,
};

/// Loads and provides access to advisor configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── columns.yaml     # Recognized columns and their defaults
/// ├── settings.yaml    # Model and report settings
/// └── benchmarks.yaml  # Market benchmark table (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_advisor::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Recognized columns: {}", loader.config().schema().columns.len());
/// # Ok::<(), salary_advisor::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AdvisorConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `columns.yaml` or `settings.yaml` is missing, if
    /// any file contains invalid YAML, or if the schema does not cover every
    /// recognized column with a default of the right kind.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let columns_path = path.join("columns.yaml");
        let schema = Self::load_yaml::<ColumnSchema>(&columns_path)?;
        schema
            .validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: columns_path.display().to_string(),
                message,
            })?;

        let settings_path = path.join("settings.yaml");
        let settings = Self::load_yaml::<Settings>(&settings_path)?;
        Self::validate_settings(&schema, &settings).map_err(|message| {
            EngineError::ConfigParseError {
                path: settings_path.display().to_string(),
                message,
            }
        })?;

        let benchmarks_path = path.join("benchmarks.yaml");
        let benchmarks = if benchmarks_path.exists() {
            Self::load_yaml::<BenchmarksConfig>(&benchmarks_path)?.benchmarks
        } else {
            Vec::new()
        };

        Ok(Self {
            config: AdvisorConfig::new(schema, settings, benchmarks),
        })
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

    fn validate_settings(schema: &ColumnSchema, settings: &Settings) -> Result<(), String> {
        let model = &settings.model;
        if model.feature_columns.is_empty() {
            return Err("model.feature_columns must not be empty".to_string());
        }
        for feature in &model.feature_columns {
            if schema.kind_of(feature) != Some(ColumnKind::Numeric) {
                return Err(format!(
                    "model feature '{}' is not a recognized numeric column",
                    feature
                ));
            }
        }
        if model.trees == 0 {
            return Err("model.trees must be at least 1".to_string());
        }
        if model.min_samples_split < 2 {
            return Err("model.min_samples_split must be at least 2".to_string());
        }
        if settings.reports.rows_per_page == 0 {
            return Err("reports.rows_per_page must be at least 1".to_string());
        }
        Ok(())
    }

    /// Returns the underlying advisor configuration.
    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> AdvisorConfig {
        self.config
    }

    /// Returns the market benchmark table.
    pub fn benchmarks(&self) -> &[MarketBenchmark] {
        self.config.benchmarks()
    }
}
