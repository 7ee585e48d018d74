//! Extract operation schema

use super::wire_enum;
use crate::codec::nullable;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Depth of content extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ExtractDepth {
    /// Basic extraction
    #[default]
    Basic,
    /// Advanced extraction: tables and embedded content, higher latency
    Advanced,
}

wire_enum!(ExtractDepth { Basic => "basic", Advanced => "advanced" });

/// Format of extracted page content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ContentFormat {
    /// Markdown
    #[default]
    Markdown,
    /// Plain text, may increase latency
    Text,
}

wire_enum!(ContentFormat { Markdown => "markdown", Text => "text" });

/// Request for the `/extract` endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractRequest {
    /// URLs to extract content from
    #[schemars(length(min = 1))]
    pub urls: Vec<String>,

    /// Extraction depth. Use 'advanced' for LinkedIn or when explicitly asked
    #[serde(default)]
    pub extract_depth: ExtractDepth,

    /// Include images found on each page
    #[serde(default)]
    pub include_images: bool,

    /// Content format, 'markdown' or 'text'
    #[serde(default)]
    pub format: ContentFormat,

    /// Include the favicon URL of each result
    #[serde(default)]
    pub include_favicon: bool,
}

impl ExtractRequest {
    /// Create a new request for the given URLs
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set the extraction depth
    pub fn extract_depth(mut self, depth: ExtractDepth) -> Self {
        self.extract_depth = depth;
        self
    }

    /// Set the content format
    pub fn format(mut self, format: ContentFormat) -> Self {
        self.format = format;
        self
    }

    /// Request images
    pub fn include_images(mut self) -> Self {
        self.include_images = true;
        self
    }

    /// Request favicons
    pub fn include_favicon(mut self) -> Self {
        self.include_favicon = true;
        self
    }
}

/// Content extracted from one URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResult {
    /// Page URL
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,

    /// Extracted content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,

    /// Image URLs found on the page
    #[serde(default, deserialize_with = "nullable")]
    pub images: Vec<String>,

    /// Favicon URL, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

/// URL the server could not extract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedResult {
    /// Requested URL
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,

    /// Server-side failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response from the `/extract` endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Successfully extracted pages
    #[serde(default, deserialize_with = "nullable")]
    pub results: Vec<ExtractResult>,

    /// Pages that could not be extracted
    #[serde(default, deserialize_with = "nullable")]
    pub failed_results: Vec<FailedResult>,

    /// Server-side processing time in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
}
