//! Configuration management for the device server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Main configuration structure for the device server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Resource directory configuration.
    pub directory: DirectoryConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server, used in logs and the health document.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration of the resource directory the device registers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Base URL of the directory authority, e.g. `http://10.0.1.111`.
    /// Registration is skipped when unset.
    pub base_url: Option<String>,

    /// Timeout applied to each request sent to the directory.
    pub timeout_secs: u64,

    /// Whether to register at startup.
    pub register: bool,
}

impl DirectoryConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 5,
            register: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "pulse-oximeter".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            directory: DirectoryConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `PULSEOX_`.
    /// For example: `PULSEOX_DIRECTORY_URL`, `PULSEOX_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("PULSEOX_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("PULSEOX_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("PULSEOX_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = parse_flag(&timestamps, true);
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        match std::env::var("PULSEOX_DIRECTORY_URL") {
            Ok(url) if !url.trim().is_empty() => {
                info!("Resource directory: {}", url);
                config.directory.base_url = Some(url.trim().to_string());
            }
            _ => warn!("PULSEOX_DIRECTORY_URL not set - resources will not be registered"),
        }

        if let Ok(timeout) = std::env::var("PULSEOX_DIRECTORY_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.directory.timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid PULSEOX_DIRECTORY_TIMEOUT_SECS: {}", timeout),
            }
        }

        if let Ok(register) = std::env::var("PULSEOX_REGISTER") {
            config.directory.register = parse_flag(&register, true);
        }

        config
    }
}

/// Interpret `false`/`0`/`no`/`off` as false and anything else as true.
/// Blank values fall back to `default`.
pub(crate) fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "" => default,
        "false" | "0" | "no" | "off" => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_directory_url_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("PULSEOX_DIRECTORY_URL", "http://10.0.1.111");
            std::env::set_var("PULSEOX_DIRECTORY_TIMEOUT_SECS", "12");
        }
        let config = Config::from_env();
        assert_eq!(
            config.directory.base_url.as_deref(),
            Some("http://10.0.1.111")
        );
        assert_eq!(config.directory.timeout(), Duration::from_secs(12));
        unsafe {
            std::env::remove_var("PULSEOX_DIRECTORY_URL");
            std::env::remove_var("PULSEOX_DIRECTORY_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_directory_unset_by_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("PULSEOX_DIRECTORY_URL");
        }
        let config = Config::from_env();
        assert!(config.directory.base_url.is_none());
        assert_eq!(config.directory.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_timeout_ignored() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("PULSEOX_DIRECTORY_TIMEOUT_SECS", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.directory.timeout_secs, 5);
        unsafe {
            std::env::remove_var("PULSEOX_DIRECTORY_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_parse_flag() {
        assert!(!parse_flag("false", true));
        assert!(!parse_flag("OFF", true));
        assert!(!parse_flag("0", true));
        assert!(parse_flag("yes", false));
        assert!(parse_flag("  ", true));
        assert!(!parse_flag("", false));
    }
}
