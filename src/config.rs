//! Process configuration.

use reqwest::Url;

use crate::error::ConfigError;

/// Environment variable holding the remote API base URL.
pub const API_BASE_URL_ENV: &str = "SOUK_API_BASE_URL";

/// Client configuration. The API base URL is the only setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_base_url: Url,
}

impl Config {
    /// Parse a base URL. A trailing `/` is added when missing so endpoint
    /// paths join beneath it.
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            value: api_base_url.to_string(),
            reason,
        };

        let mut url = Url::parse(api_base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_string()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self { api_base_url: url })
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = lookup(API_BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(API_BASE_URL_ENV))?;
        Self::new(&value)
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }
}
