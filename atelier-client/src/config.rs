//! Client configuration

use std::time::Duration;

/// Default backend address
pub const DEFAULT_API_URL: &str = "http://localhost:5120/api";

/// Client configuration for connecting to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:5120/api")
    pub base_url: String,

    /// Request timeout; `None` waits as long as the server takes
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Load from environment variables
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `ATELIER_API_URL` | `http://localhost:5120/api` |
    /// | `ATELIER_TIMEOUT_SECS` | unset (no timeout) |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ATELIER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout = std::env::var("ATELIER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        Self { base_url, timeout }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        self
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_off_by_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = ClientConfig::default().with_timeout(15);
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.with_timeout(0).timeout, None);
    }
}
