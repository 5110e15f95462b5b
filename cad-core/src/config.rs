//! Where the analytics service lives and how long filters must settle.

use std::env;
use std::time::Duration;

/// Deployed analytics service.
pub const DEFAULT_API_BASE_URL: &str = "https://complainst-deployment.onrender.com";

/// Environment variable overriding the service URL.
pub const API_BASE_URL_VAR: &str = "CAD_API_BASE_URL";

/// Quiet period before a filter change may trigger a fetch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Prefix for every endpoint path; empty means same origin.
    pub api_base_url: String,
    pub debounce: Duration,
}

impl DashboardConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Browser build: the base URL is baked in at compile time and defaults
    /// to same-origin, which is how the dev server proxies the API.
    pub fn web() -> Self {
        Self::new(option_env!("CAD_API_BASE_URL").unwrap_or(""))
    }

    /// Native build: read `CAD_API_BASE_URL`, falling back to the deployed
    /// service.
    pub fn from_env() -> Self {
        let base = match env::var(API_BASE_URL_VAR) {
            Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => {
                log::info!(
                    "{} not set, using default: {}",
                    API_BASE_URL_VAR,
                    DEFAULT_API_BASE_URL
                );
                DEFAULT_API_BASE_URL.to_string()
            }
        };
        Self::new(base)
    }

    pub fn with_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_override() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.debounce, Duration::from_millis(500));

        let config = config.with_base_url("http://localhost:8000");
        assert_eq!(config.api_base_url, "http://localhost:8000");
    }
}
