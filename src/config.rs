//! Client configuration
//!
//! Everything the client needs is held in one [`ClientConfig`] value that is
//! validated on every construction path. There is no global client state.

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.cradlepointecm.com/api/v3";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "CP_BASE_URL";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "NCM_API_KEY";

/// Largest page the API will serve
pub const MAX_PAGE_SIZE: u32 = 50;

/// Configuration for [`crate::NcmClient`]
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// APIv3 bearer token, without the "Bearer" prefix
    pub api_key: String,

    /// API root, e.g. `https://api.cradlepointecm.com/api/v3`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Server-enforced maximum page size
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Page size for single-page calls; the server default when unset
    #[serde(default)]
    pub default_page_size: Option<u32>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Log operation outcomes at info level instead of debug
    #[serde(default)]
    pub log_events: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("ncm-client/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    /// Create a validated config with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Start a config builder
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self {
                api_key: api_key.into(),
                base_url: default_base_url(),
                max_page_size: default_max_page_size(),
                default_page_size: None,
                timeout_secs: default_timeout_secs(),
                user_agent: default_user_agent(),
                log_events: false,
            },
        }
    }

    /// Load from `NCM_API_KEY` and `CP_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV).ok_or_else(|| Error::missing_field(API_KEY_ENV))?;
        let mut builder = Self::builder(api_key);
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&contents)
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.max_page_size == 0 {
            return Err(Error::invalid_value("max_page_size", "must be positive"));
        }

        if let Some(size) = self.default_page_size {
            if size == 0 || size > self.max_page_size {
                return Err(Error::invalid_value(
                    "default_page_size",
                    format!("must be between 1 and {}", self.max_page_size),
                ));
            }
        }

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }

        Ok(())
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL for a path under the API root
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_page_size", &self.max_page_size)
            .field("default_page_size", &self.default_page_size)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_events", &self.log_events)
            .finish()
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the server's maximum page size
    #[must_use]
    pub fn max_page_size(mut self, size: u32) -> Self {
        self.config.max_page_size = size;
        self
    }

    /// Set the page size for single-page calls
    #[must_use]
    pub fn default_page_size(mut self, size: u32) -> Self {
        self.config.default_page_size = Some(size);
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Log operation outcomes at info level
    #[must_use]
    pub fn log_events(mut self, enabled: bool) -> Self {
        self.config.log_events = enabled;
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("key").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_page_size, 50);
        assert_eq!(config.default_page_size, None);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.log_events);
        assert!(config.user_agent.starts_with("ncm-client/"));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder("key")
            .base_url("http://localhost:8080/api/v3/")
            .max_page_size(100)
            .default_page_size(20)
            .timeout(Duration::from_secs(5))
            .user_agent("test-agent/1.0")
            .log_events(true)
            .build()
            .unwrap();

        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.default_page_size, Some(20));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert!(config.log_events);
        assert_eq!(
            config.endpoint("/beta/users"),
            "http://localhost:8080/api/v3/beta/users"
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = ClientConfig::new("   ").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "api_key"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ClientConfig::builder("key").base_url("not a url").build();
        assert!(matches!(err, Err(Error::InvalidConfigValue { .. })));

        let err = ClientConfig::builder("key").base_url("ftp://host/api").build();
        assert!(matches!(err, Err(Error::InvalidConfigValue { .. })));

        let err = ClientConfig::builder("key").max_page_size(0).build();
        assert!(matches!(err, Err(Error::InvalidConfigValue { .. })));

        let err = ClientConfig::builder("key").default_page_size(51).build();
        assert!(matches!(err, Err(Error::InvalidConfigValue { .. })));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (API_KEY_ENV, "env-key"),
            (BASE_URL_ENV, "https://staging.example.com/api/v3"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| vars.get(k).map(ToString::to_string)).unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url, "https://staging.example.com/api/v3");

        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_from_yaml() {
        let config = ClientConfig::from_yaml_str(
            r"
api_key: yaml-key
default_page_size: 25
log_events: true
",
        )
        .unwrap();
        assert_eq!(config.api_key, "yaml-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.default_page_size, Some(25));
        assert!(config.log_events);

        assert!(matches!(
            ClientConfig::from_yaml_str("api_key: ''"),
            Err(Error::MissingConfigField { .. })
        ));
        assert!(matches!(
            ClientConfig::from_yaml_str("base_url: [unclosed"),
            Err(Error::YamlParse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: file-key\nmax_page_size: 40").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.max_page_size, 40);

        let missing = ClientConfig::from_file("/definitely/not/here.yaml");
        assert!(matches!(missing, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("super-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
