//! Error types for TavilyKit

use thiserror::Error;

/// Errors that can occur while configuring the client or running an operation
#[derive(Debug, Error)]
pub enum TavilyError {
    /// API key is missing or blank
    #[error("Missing required configuration: api_key")]
    MissingApiKey,

    /// API key cannot be sent as a header value
    #[error("Invalid api_key: contains characters not allowed in a header")]
    InvalidApiKey,

    /// Base address is not an absolute http(s) URL
    #[error("Invalid base address: {0}")]
    InvalidBaseAddress(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Transport reported a timeout
    #[error("Request timed out")]
    Timeout,

    /// Other transport error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// Server answered with a non-success status
    #[error("{endpoint} failed with HTTP status {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// Response body did not match the expected shape
    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Tool arguments could not be decoded into a request
    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[source] serde_json::Error),

    /// No tool with this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl TavilyError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TavilyError::Timeout
        } else if err.is_connect() {
            TavilyError::ConnectError(err)
        } else {
            TavilyError::RequestError(err.to_string())
        }
    }

    /// HTTP status carried by a protocol error
    pub fn status(&self) -> Option<u16> {
        match self {
            TavilyError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for errors raised before any request was sent
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            TavilyError::MissingApiKey
                | TavilyError::InvalidApiKey
                | TavilyError::InvalidBaseAddress(_)
                | TavilyError::ClientBuildError(_)
        )
    }
}
