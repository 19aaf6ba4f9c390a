//! Client configuration
//!
//! Settings come from an optional YAML file and are then overridden by
//! `MATJIP_*` environment variables:
//!
//! ```yaml
//! api_url: https://matjip.example.com/api
//! timeout_secs: 15
//! page_size: 21
//! requests_per_second: 5
//! ```

use crate::error::{Error, Result};
use crate::http::{ApiClientConfig, RateLimiterConfig};
use crate::types::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const ENV_API_URL: &str = "MATJIP_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "MATJIP_TIMEOUT_SECS";
pub const ENV_PAGE_SIZE: &str = "MATJIP_PAGE_SIZE";

/// Effective client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Base URL of the backend API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Client-side request pacing, 10/s when the key is absent; an explicit
    /// `null` disables it
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: Option<u32>,

    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_requests_per_second() -> Option<u32> {
    Some(10)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            requests_per_second: default_requests_per_second(),
            user_agent: None,
        }
    }
}

impl AppConfig {
    /// Load from an optional file, apply the process environment, validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML config file without env overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_yaml(&content)
    }

    /// Parse YAML config text; an empty document yields the defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply overrides from a variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| Error::invalid_value(ENV_TIMEOUT_SECS, format!("not a number: {raw}")))?;
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            self.page_size = raw
                .trim()
                .parse()
                .map_err(|_| Error::invalid_value(ENV_PAGE_SIZE, format!("not a number: {raw}")))?;
        }
        Ok(())
    }

    /// Check values a client cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(Error::invalid_value("api_url", "must not be empty"));
        }

        let url = Url::parse(&self.api_url)
            .map_err(|e| Error::invalid_value("api_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "api_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(Error::invalid_value(
                "page_size",
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }

        if self.requests_per_second == Some(0) {
            return Err(Error::invalid_value(
                "requests_per_second",
                "must be positive; set it to null to disable pacing",
            ));
        }

        Ok(())
    }

    /// Settings for [`ApiClient`](crate::http::ApiClient)
    pub fn to_client_config(&self) -> ApiClientConfig {
        let mut builder = ApiClientConfig::builder()
            .base_url(self.api_url.trim())
            .timeout(Duration::from_secs(self.timeout_secs));

        builder = match self.requests_per_second {
            Some(rps) => builder.rate_limit(RateLimiterConfig::new(rps, rps)),
            None => builder.no_rate_limit(),
        };

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}
