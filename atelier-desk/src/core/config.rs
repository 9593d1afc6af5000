//! Desk configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | ATELIER_API_URL | http://localhost:5120/api | Backend base URL |
//! | ATELIER_TIMEOUT_SECS | unset | Request timeout (no timeout when unset) |
//! | ATELIER_DATA_DIR | .atelier | Local storage directory |
//! | ATELIER_LOG_LEVEL | info | Default log filter |
//! | ATELIER_LOG_DIR | unset | Daily log files instead of stderr |
//!
//! A `.env` file is read first; command-line flags win over both.

use std::path::PathBuf;

use atelier_client::ClientConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the local-storage file
    pub data_dir: PathBuf,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Log directory; logs go to stderr when unset
    pub log_dir: Option<PathBuf>,
    /// Backend connection
    pub client: ClientConfig,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("ATELIER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".atelier")),
            log_level: std::env::var("ATELIER_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("ATELIER_LOG_DIR").ok().map(PathBuf::from),
            client: ClientConfig::from_env(),
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(url) = overrides.api_url {
            self.client = self.client.with_base_url(url);
        }
        if let Some(secs) = overrides.timeout_secs {
            self.client = self.client.with_timeout(secs);
        }
        if let Some(dir) = overrides.data_dir {
            self.data_dir = dir;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if overrides.log_dir.is_some() {
            self.log_dir = overrides.log_dir;
        }
        self
    }

    /// Path of the local-storage file
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("local_storage.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win() {
        let config = AppConfig {
            data_dir: PathBuf::from(".atelier"),
            log_level: "info".into(),
            log_dir: None,
            client: ClientConfig::default(),
        }
        .with_overrides(ConfigOverrides {
            api_url: Some("http://atelier.local/api".into()),
            timeout_secs: Some(20),
            data_dir: Some(PathBuf::from("/tmp/atelier")),
            log_level: None,
            log_dir: None,
        });

        assert_eq!(config.client.base_url, "http://atelier.local/api");
        assert_eq!(config.client.timeout, Some(std::time::Duration::from_secs(20)));
        assert_eq!(config.storage_path(), PathBuf::from("/tmp/atelier/local_storage.json"));
        assert_eq!(config.log_level, "info");
    }
}
