//! Map operation schema

use super::CrawlScope;
use crate::codec::nullable;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request for the `/map` endpoint
///
/// Same traversal options as a crawl; mapping returns URLs only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MapRequest {
    /// The root URL to begin the mapping
    #[schemars(length(min = 1))]
    pub url: String,

    #[serde(flatten)]
    pub scope: CrawlScope,
}

impl MapRequest {
    /// Create a new request rooted at the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Replace the traversal options
    pub fn scope(mut self, scope: CrawlScope) -> Self {
        self.scope = scope;
        self
    }
}

/// Response from the `/map` endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapResponse {
    /// URL the mapping started from
    #[serde(default, deserialize_with = "nullable")]
    pub base_url: String,

    /// Discovered URLs
    #[serde(default, deserialize_with = "nullable")]
    pub results: Vec<String>,

    /// Server-side processing time in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_has_no_content_options() {
        let req = MapRequest::new("https://docs.rs")
            .scope(CrawlScope::default().limit(5).allow_external());
        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(value["url"], json!("https://docs.rs"));
        assert_eq!(value["limit"], json!(5));
        assert_eq!(value["allow_external"], json!(true));
        assert!(value.get("format").is_none());
        assert!(value.get("extract_depth").is_none());
        assert!(value.get("include_favicon").is_none());
    }

    #[test]
    fn test_response_decoding() {
        let resp: MapResponse = serde_json::from_value(json!({
            "base_url": "https://docs.rs",
            "results": ["https://docs.rs/a", "https://docs.rs/b"]
        }))
        .unwrap();
        assert_eq!(resp.results, vec!["https://docs.rs/a", "https://docs.rs/b"]);
    }
}
