//! Configuration loading and management for the Payroll Formula Engine.
//!
//! This module provides functionality to load the service configuration
//! from a YAML file: server address, store timeout, logging and seed data.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Store timeout: {:?}", config.config().store.timeout());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, DEFAULT_CONFIG_PATH};
pub use types::{EngineConfig, LoggingConfig, SeedConfig, ServerConfig, StoreConfig};
