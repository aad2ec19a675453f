//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use pharma_assist_core::Language;

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// History persistence configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Default display locale
    #[serde(default)]
    pub locale: Language,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Enforce the configured CORS origins
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
    /// Allowed CORS origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Hosted generative-model provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// REST endpoint base
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key; falls back to `GEMINI_API_KEY`
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Text/vision model
    #[serde(default = "default_model")]
    pub model: String,
    /// Speech synthesis model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    /// Fixed prebuilt voice for narration
    #[serde(default = "default_voice")]
    pub voice: String,
    /// HTTP client timeout in seconds; the only timeout this layer has
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_api_key() -> String {
    std::env::var("GEMINI_API_KEY").unwrap_or_default()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_voice() -> String {
    "Algenib".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: default_api_key(),
            model: default_model(),
            tts_model: default_tts_model(),
            voice: default_voice(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// History persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// JSON file backing the history store
    #[serde(default = "default_history_path")]
    pub path: String,
    /// Entry cap; the oldest entry is evicted beyond this
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

fn default_history_path() -> String {
    "data/history.json".to_string()
}

fn default_history_capacity() -> usize {
    50
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            capacity: default_history_capacity(),
        }
    }
}

/// Load settings from files and environment
///
/// Priority: env vars > `config/{env}.toml` > `config/default.toml` > defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if Path::new("config/default.toml").exists() {
        builder = builder.add_source(File::with_name("config/default.toml"));
    }

    if let Some(env) = env {
        let env_path = format!("config/{env}.toml");
        if Path::new(&env_path).exists() {
            builder = builder.add_source(File::with_name(&env_path));
        } else {
            return Err(ConfigError::FileNotFound(env_path));
        }
    }

    let settings: Settings = builder
        .add_source(Environment::with_prefix("PHARMA_ASSIST").separator("__"))
        .build()?
        .try_deserialize()?;

    settings.validate()?;
    Ok(settings)
}

impl Settings {
    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.capacity".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "provider.timeout_secs".to_string(),
                message: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}
