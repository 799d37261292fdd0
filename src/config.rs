//! Process-wide HTTP configuration.
//!
//! The header set is read once at startup (the `HEADER` environment
//! variable, a JSON object of header names to values) and baked into one
//! shared `reqwest::Client`. The client is passed explicitly into the
//! aggregator and every job; nothing reads the environment after startup.

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Per-request timeout applied to every fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HEADER is not a JSON object of strings: {0}")]
    HeaderJson(#[from] serde_json::Error),

    #[error("invalid header name {name:?}")]
    HeaderName { name: String },

    #[error("invalid value for header {name:?}")]
    HeaderValue { name: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// The headers every outgoing request carries.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    headers: HeaderMap,
}

impl HttpConfig {
    /// Build from the raw `HEADER` JSON, e.g.
    /// `{"User-Agent": "...", "Accept-Language": "es-CO"}`.
    ///
    /// With no JSON provided the configuration falls back to a default
    /// `User-Agent` naming this crate.
    pub fn from_header_json(raw: Option<&str>) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();

        match raw {
            Some(raw) => {
                // BTreeMap keeps iteration (and error reporting) stable.
                let parsed: BTreeMap<String, String> = serde_json::from_str(raw)?;
                for (name, value) in parsed {
                    let header_name = HeaderName::from_bytes(name.as_bytes())
                        .map_err(|_| ConfigError::HeaderName { name: name.clone() })?;
                    let header_value = HeaderValue::from_str(&value)
                        .map_err(|_| ConfigError::HeaderValue { name: name.clone() })?;
                    headers.insert(header_name, header_value);
                }
                info!(count = headers.len(), "Loaded HTTP headers from environment");
            }
            None => {
                headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
                info!(user_agent = DEFAULT_USER_AGENT, "HEADER unset; using default User-Agent");
            }
        }

        Ok(Self { headers })
    }

    /// The shared client: default headers plus the per-request timeout.
    pub fn build_client(&self) -> Result<Client, ConfigError> {
        Ok(Client::builder()
            .default_headers(self.headers.clone())
            .timeout(REQUEST_TIMEOUT)
            .build()?)
    }
}
