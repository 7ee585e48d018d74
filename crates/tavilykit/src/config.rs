//! Client configuration
//!
//! The base address and API key are supplied from outside the client,
//! usually the process environment. [`ClientConfig::validate`] is run once
//! before the transport is built.

use crate::error::TavilyError;
use url::Url;

/// Default API base address
pub const DEFAULT_BASE_ADDRESS: &str = "https://api.tavily.com";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "TAVILY_API_KEY";

/// Environment variable overriding the base address
pub const BASE_ADDRESS_ENV: &str = "TAVILY_BASE_ADDRESS";

/// Configuration for [`ApiClient`](crate::ApiClient)
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base address, e.g. `https://api.tavily.com`
    pub base_address: String,
    /// Bearer credential sent with every request
    pub api_key: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_address", &self.base_address)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ClientConfig {
    /// Create a config with the default base address
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_address: DEFAULT_BASE_ADDRESS.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Set the base address
    pub fn base_address(mut self, base_address: impl Into<String>) -> Self {
        self.base_address = base_address.into();
        self
    }

    /// Load from `TAVILY_API_KEY` and `TAVILY_BASE_ADDRESS`
    pub fn from_env() -> Result<Self, TavilyError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, TavilyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV).unwrap_or_default();
        let base_address = lookup(BASE_ADDRESS_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_ADDRESS.to_string());

        let config = Self {
            base_address,
            api_key,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the key is present and the base address is an absolute http(s) URL
    pub fn validate(&self) -> Result<(), TavilyError> {
        if self.api_key.trim().is_empty() {
            return Err(TavilyError::MissingApiKey);
        }
        self.base_url().map(|_| ())
    }

    /// Parsed base address with a trailing slash, so endpoint paths join under it
    pub(crate) fn base_url(&self) -> Result<Url, TavilyError> {
        let mut raw = self.base_address.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let url =
            Url::parse(&raw).map_err(|e| TavilyError::InvalidBaseAddress(format!("{raw}: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(TavilyError::InvalidBaseAddress(format!(
                "unsupported scheme {other}"
            ))),
        }
    }
}
