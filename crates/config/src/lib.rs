//! Configuration management for the pharma assistant
//!
//! Supports loading configuration from:
//! - TOML files (`config/default.toml`, then `config/{env}.toml`)
//! - Environment variables (`PHARMA_ASSIST_` prefix)

pub mod settings;

pub use settings::{
    load_settings, HistoryConfig, ProviderConfig, ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for pharma_assist_core::Error {
    fn from(err: ConfigError) -> Self {
        pharma_assist_core::Error::Config(err.to_string())
    }
}
