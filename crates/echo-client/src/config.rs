//! Client configuration from environment variables.

use std::env;

use echo_core::{DEFAULT_PAGE_SIZE, clamp_page_size};

/// Base URL used when `ECHO_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the notes service, without the `/api/v1` prefix.
    pub base_url: String,
    /// Page size for feed requests.
    pub page_size: u32,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            log_level: "warn".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `ECHO_API_URL`: notes service base URL (default: http://localhost:8080)
    /// - `ECHO_PAGE_SIZE`: notes per page, clamped to 1..=100 (default: 20)
    /// - `LOG_LEVEL`: logging level (default: "warn")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = match lookup("ECHO_API_URL") {
            Some(url) => parse_base_url(&url)?,
            None => defaults.base_url,
        };

        let page_size = match lookup("ECHO_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map(clamp_page_size)
                .map_err(|e| ConfigError::InvalidValue {
                    name: "ECHO_PAGE_SIZE".to_string(),
                    reason: e.to_string(),
                })?,
            None => defaults.page_size,
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Self {
            base_url,
            page_size,
            log_level,
        })
    }

    /// Replace the base URL, validating it the same way the environment is.
    pub fn with_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(url)?;
        Ok(self)
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err(ConfigError::InvalidValue {
            name: "ECHO_API_URL".to_string(),
            reason: format!("expected an http(s) URL, got {raw:?}"),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("ECHO_API_URL", "https://echo.example.org/"),
            ("ECHO_PAGE_SIZE", "250"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://echo.example.org");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_page_size() {
        let err = ClientConfig::from_lookup(lookup(&[("ECHO_PAGE_SIZE", "lots")])).unwrap_err();
        assert!(err.to_string().contains("ECHO_PAGE_SIZE"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ClientConfig::default().with_base_url("localhost:8080").unwrap_err();
        assert!(err.to_string().contains("ECHO_API_URL"));
    }
}
