//! Configuration management for the MCP server.
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file) and validated once at startup. Anything invalid is reported
//! as [`Error::Config`] so the process exits before serving a single call.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};

/// Default upstream request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Upstream MeetGeek API settings.
    pub upstream: UpstreamConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Upstream API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the MeetGeek API, without the `/v1` suffix.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// MeetGeek API key used when a session does not supply its own.
    pub meetgeek_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "meetgeek_api_key",
                &self.meetgeek_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "MeetgeekMCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            upstream: UpstreamConfig {
                base_url: String::new(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load and validate configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = lookup("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.upstream.base_url = lookup("MEETGEEK_BASE_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::config("Missing MEETGEEK_BASE_URL environment variable"))?;

        if let Some(timeout) = lookup("MEETGEEK_TIMEOUT_SECS") {
            config.upstream.timeout_secs = timeout
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    Error::config(format!("Invalid MEETGEEK_TIMEOUT_SECS: {}", timeout))
                })?;
        }

        config.credentials.meetgeek_api_key = lookup("MEETGEEK_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        config.transport = TransportConfig::from_lookup(&lookup)?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.upstream.base_url).map_err(|e| {
            Error::config(format!(
                "Invalid MEETGEEK_BASE_URL '{}': {}",
                self.upstream.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "MEETGEEK_BASE_URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.credentials.meetgeek_api_key.is_none() && self.transport.is_stdio() {
            return Err(Error::config("Missing MEETGEEK_API_KEY environment variable"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_minimal_stdio_config() {
        let config = load(&[
            ("MEETGEEK_BASE_URL", "https://api.meetgeek.ai"),
            ("MEETGEEK_API_KEY", "key-123"),
        ])
        .unwrap();
        assert_eq!(config.upstream.base_url, "https://api.meetgeek.ai");
        assert_eq!(config.upstream.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.credentials.meetgeek_api_key.as_deref(), Some("key-123"));
        assert_eq!(config.server.name, "MeetgeekMCP");
        assert!(config.transport.is_stdio());
    }

    #[test]
    fn test_missing_base_url() {
        let err = load(&[("MEETGEEK_API_KEY", "key-123")]).unwrap_err();
        assert!(err.to_string().contains("MEETGEEK_BASE_URL"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = load(&[
            ("MEETGEEK_BASE_URL", "api.meetgeek.ai"),
            ("MEETGEEK_API_KEY", "key-123"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = load(&[
            ("MEETGEEK_BASE_URL", "ftp://api.meetgeek.ai"),
            ("MEETGEEK_API_KEY", "key-123"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_stdio_requires_api_key() {
        let err = load(&[("MEETGEEK_BASE_URL", "https://api.meetgeek.ai")]).unwrap_err();
        assert!(err.to_string().contains("MEETGEEK_API_KEY"));

        let err = load(&[
            ("MEETGEEK_BASE_URL", "https://api.meetgeek.ai"),
            ("MEETGEEK_API_KEY", "   "),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("MEETGEEK_API_KEY"));
    }

    #[cfg(feature = "sse")]
    #[test]
    fn test_sse_allows_missing_api_key() {
        let config = load(&[
            ("MEETGEEK_BASE_URL", "https://api.meetgeek.ai"),
            ("MCP_TRANSPORT", "sse"),
        ])
        .unwrap();
        assert!(config.credentials.meetgeek_api_key.is_none());
        assert!(!config.transport.is_stdio());
    }

    #[test]
    fn test_invalid_timeout() {
        for bad in ["abc", "0", "-5"] {
            let err = load(&[
                ("MEETGEEK_BASE_URL", "https://api.meetgeek.ai"),
                ("MEETGEEK_API_KEY", "key-123"),
                ("MEETGEEK_TIMEOUT_SECS", bad),
            ])
            .unwrap_err();
            assert!(err.to_string().contains("MEETGEEK_TIMEOUT_SECS"));
        }
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MEETGEEK_BASE_URL", "https://api.meetgeek.ai"),
            ("MEETGEEK_API_KEY", "key-123"),
            ("MEETGEEK_TIMEOUT_SECS", "90"),
            ("MCP_SERVER_NAME", "meetings"),
            ("MCP_LOG_LEVEL", "debug"),
        ])
        .unwrap();
        assert_eq!(config.upstream.timeout_secs, 90);
        assert_eq!(config.server.name, "meetings");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MEETGEEK_BASE_URL", "https://env.example.com");
            std::env::set_var("MEETGEEK_API_KEY", "env_key_12345");
            std::env::remove_var("MCP_TRANSPORT");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.upstream.base_url, "https://env.example.com");
        assert_eq!(
            config.credentials.meetgeek_api_key.as_deref(),
            Some("env_key_12345")
        );
        unsafe {
            std::env::remove_var("MEETGEEK_BASE_URL");
            std::env::remove_var("MEETGEEK_API_KEY");
        }
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            meetgeek_api_key: Some("super_secret_key".to_string()),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
