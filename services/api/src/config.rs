//! services/api/src/config.rs
//!
//! Defines the service's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use emotion_assessment_core::features::DEFAULT_SENSITIVITY;
use emotion_assessment_core::StoragePreference;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// When absent, assessments are kept in process memory only.
    pub database_url: Option<String>,
    pub log_level: Level,
    /// Base URL of the remote service receiving uploads.
    pub sync_base_url: String,
    pub sync_timeout: Duration,
    pub sensitivity: f64,
    pub default_storage_preference: StoragePreference,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server and Database Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Remote Sync Settings ---
        let sync_base_url = std::env::var("SYNC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let sync_timeout = match std::env::var("SYNC_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                ConfigError::InvalidValue(
                    "SYNC_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a whole number of seconds", raw),
                )
            })?,
            Err(_) => Duration::from_secs(10),
        };

        // --- Load Engine Settings ---
        let sensitivity = match std::env::var("SENSITIVITY") {
            Ok(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v > 0.0)
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "SENSITIVITY".to_string(),
                        format!("'{}' is not a positive number", raw),
                    )
                })?,
            Err(_) => DEFAULT_SENSITIVITY,
        };

        let default_storage_preference = match std::env::var("DEFAULT_STORAGE_PREFERENCE") {
            Ok(raw) => raw.parse::<StoragePreference>().map_err(|e| {
                ConfigError::InvalidValue("DEFAULT_STORAGE_PREFERENCE".to_string(), e.to_string())
            })?,
            Err(_) => StoragePreference::Local,
        };

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            sync_base_url,
            sync_timeout,
            sensitivity,
            default_storage_preference,
        })
    }
}
