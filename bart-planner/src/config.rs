//! Application configuration.
//!
//! Read from environment variables at startup:
//!
//! | Variable            | Default                            |
//! |---------------------|------------------------------------|
//! | `BART_API_BASE_URL` | `https://bart.trentwil.es/api/v1`  |
//! | `BART_BIND_ADDR`    | `127.0.0.1:3000`                   |
//! | `BART_STATIC_DIR`   | `static`                           |
//! | `BART_TIMEOUT_SECS` | unset (no request timeout)         |

use std::net::SocketAddr;
use std::time::Duration;

use crate::bart::{BartConfig, DEFAULT_BASE_URL};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the prediction API
    pub api_base_url: String,
    /// Address the web server listens on
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: String,
    /// Upstream request timeout
    pub request_timeout: Option<Duration>,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration using `lookup` to read variables.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_base_url = get("BART_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let bind_raw = get("BART_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "BART_BIND_ADDR",
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let static_dir = get("BART_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        let request_timeout = get("BART_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| ConfigError::Invalid {
                        var: "BART_TIMEOUT_SECS",
                        value: raw.clone(),
                        reason: e.to_string(),
                    })
            })
            .transpose()?;

        Ok(Self {
            api_base_url,
            bind_addr,
            static_dir,
            request_timeout,
        })
    }

    /// Client configuration for the prediction API.
    pub fn bart(&self) -> BartConfig {
        let config = BartConfig::new().with_base_url(&self.api_base_url);
        match self.request_timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("BART_API_BASE_URL", "http://localhost:9000/api/v1"),
            ("BART_BIND_ADDR", "0.0.0.0:8080"),
            ("BART_STATIC_DIR", "/srv/static"),
            ("BART_TIMEOUT_SECS", "15"),
        ])
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:9000/api/v1");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.static_dir, "/srv/static");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));

        let bart = config.bart();
        assert_eq!(bart.base_url, "http://localhost:9000/api/v1");
        assert_eq!(bart.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = load(&[("BART_BIND_ADDR", "  "), ("BART_TIMEOUT_SECS", "")]).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn invalid_bind_addr() {
        let err = load(&[("BART_BIND_ADDR", "not-an-address")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "BART_BIND_ADDR", .. }));
    }

    #[test]
    fn invalid_timeout() {
        let err = load(&[("BART_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("BART_TIMEOUT_SECS"));
    }
}
