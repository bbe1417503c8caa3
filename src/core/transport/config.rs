//! Transport configuration types.

use serde::{Deserialize, Serialize};

use crate::core::config::parse_flag;

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// HTTP transport serving resources under their paths.
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on. `0` picks a free port.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::Http(HttpConfig::default())
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// Create an HTTP transport config.
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("PULSEOX_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let host = std::env::var("PULSEOX_HTTP_HOST").unwrap_or_else(|_| default_host());
        let enable_cors = std::env::var("PULSEOX_HTTP_CORS")
            .map(|v| parse_flag(&v, true))
            .unwrap_or_else(|_| default_cors());

        Self::Http(HttpConfig {
            port,
            host,
            enable_cors,
        })
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            Self::Http(cfg) => format!("HTTP on {}:{}", cfg.host, cfg.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_http() {
        let TransportConfig::Http(cfg) = TransportConfig::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.host, "127.0.0.1");
        assert!(cfg.enable_cors);
    }

    #[test]
    fn test_description() {
        assert_eq!(
            TransportConfig::http(9000, "0.0.0.0").description(),
            "HTTP on 0.0.0.0:9000"
        );
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: TransportConfig =
            serde_json::from_str(r#"{"type":"http","port":5683}"#).unwrap();
        let TransportConfig::Http(cfg) = config;
        assert_eq!(cfg.port, 5683);
        assert_eq!(cfg.host, "127.0.0.1");
    }
}
