//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

/// The configuration file used when none is given, relative to the working
/// directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/payroll.yaml";

/// Loads and provides access to the service configuration.
///
/// # File Format
///
/// ```text
/// server:
///   listen_addr: "127.0.0.1:8080"
/// store:
///   timeout_ms: 10000
/// logging:
///   level: info
///   json: false
/// seed:
///   employees:
///     - empNo: E001
///       name: Nimal Perera
///       salary: 85000
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml")?;
/// println!("Listening on {}", loader.config().server.listen_addr);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or invalid values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let config = Self::load_yaml::<EngineConfig>(path)?;
        Self::validate(&config, path)?;
        Ok(Self { config })
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

    fn validate(config: &EngineConfig, path: &Path) -> EngineResult<()> {
        if config.store.timeout_ms == 0 {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: "store.timeout_ms must be greater than zero".to_string(),
            });
        }
        if let Some(employee) = config
            .seed
            .employees
            .iter()
            .find(|e| e.emp_no.trim().is_empty())
        {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!(
                    "seed employee '{}' is missing an empNo",
                    employee.name
                ),
            });
        }
        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}
