//! Tool adapter for agent runtimes
//!
//! Exposes the five API operations as named tools. Each call decodes its
//! arguments into a request, runs it through a [`TavilyApi`] and renders the
//! response to text. Errors are returned before anything is rendered.

use crate::client::{ApiClient, TavilyApi};
use crate::config::ClientConfig;
use crate::error::TavilyError;
use crate::render::Render;
use crate::types::{CrawlRequest, ExtractRequest, MapRequest, SearchRequest};
use crate::{
    CRAWL_DESCRIPTION, EXTRACT_DESCRIPTION, MAP_DESCRIPTION, SEARCH_DESCRIPTION,
    USAGE_DESCRIPTION,
};
use schemars::schema_for;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The tools exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Search,
    Extract,
    Crawl,
    Map,
    Usage,
}

impl ToolKind {
    /// Every tool, in listing order
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Search,
        ToolKind::Extract,
        ToolKind::Crawl,
        ToolKind::Map,
        ToolKind::Usage,
    ];

    /// Tool name used by callers
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Search => "search",
            ToolKind::Extract => "extract",
            ToolKind::Crawl => "crawl",
            ToolKind::Map => "map",
            ToolKind::Usage => "usage",
        }
    }

    /// Tool description for LLM consumption
    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::Search => SEARCH_DESCRIPTION,
            ToolKind::Extract => EXTRACT_DESCRIPTION,
            ToolKind::Crawl => CRAWL_DESCRIPTION,
            ToolKind::Map => MAP_DESCRIPTION,
            ToolKind::Usage => USAGE_DESCRIPTION,
        }
    }

    /// JSON schema of the tool arguments
    ///
    /// Carries required fields, numeric ranges and the closed enum sets.
    pub fn input_schema(&self) -> Value {
        let schema = match self {
            ToolKind::Search => schema_for!(SearchRequest),
            ToolKind::Extract => schema_for!(ExtractRequest),
            ToolKind::Crawl => schema_for!(CrawlRequest),
            ToolKind::Map => schema_for!(MapRequest),
            ToolKind::Usage => return json!({"type": "object", "properties": {}}),
        };
        serde_json::to_value(schema).unwrap_or_default()
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = TavilyError;

    /// Accepts the plain name and the `tavily-` / `tavily_` prefixed forms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s
            .strip_prefix("tavily-")
            .or_else(|| s.strip_prefix("tavily_"))
            .unwrap_or(s);
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| TavilyError::UnknownTool(s.to_string()))
    }
}

/// Builder for configuring the tool set
#[derive(Default)]
pub struct ToolBuilder {
    config: Option<ClientConfig>,
    api: Option<Arc<dyn TavilyApi>>,
}

impl ToolBuilder {
    /// Create a new tool builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an HTTP client built from this configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom API implementation instead of the HTTP client
    pub fn api(mut self, api: impl TavilyApi + 'static) -> Self {
        self.api = Some(Arc::new(api));
        self
    }

    /// Build the tool
    ///
    /// Without a custom API or configuration, the configuration is read from
    /// the environment.
    pub fn build(self) -> Result<Tool, TavilyError> {
        let api: Arc<dyn TavilyApi> = match (self.api, self.config) {
            (Some(api), _) => api,
            (None, Some(config)) => Arc::new(ApiClient::new(&config)?),
            (None, None) => Arc::new(ApiClient::new(&ClientConfig::from_env()?)?),
        };
        Ok(Tool { api })
    }
}

/// Configured tool set
#[derive(Clone)]
pub struct Tool {
    api: Arc<dyn TavilyApi>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool").finish_non_exhaustive()
    }
}

impl Tool {
    /// Create a new tool builder
    pub fn builder() -> ToolBuilder {
        ToolBuilder::new()
    }

    /// Create a tool backed by an HTTP client
    pub fn from_config(config: ClientConfig) -> Result<Self, TavilyError> {
        ToolBuilder::new().config(config).build()
    }

    /// Run a search and render the results
    pub async fn search(
        &self,
        request: SearchRequest,
        token: &CancellationToken,
    ) -> Result<String, TavilyError> {
        let request = request.finalize();
        let response = self.api.search(&request, token).await?;
        Ok(response.render())
    }

    /// Extract URLs and render the content
    pub async fn extract(
        &self,
        request: ExtractRequest,
        token: &CancellationToken,
    ) -> Result<String, TavilyError> {
        let response = self.api.extract(&request, token).await?;
        Ok(response.render())
    }

    /// Crawl a site and render page previews
    pub async fn crawl(
        &self,
        request: CrawlRequest,
        token: &CancellationToken,
    ) -> Result<String, TavilyError> {
        let response = self.api.crawl(&request, token).await?;
        Ok(response.render())
    }

    /// Map a site and render the URL list
    pub async fn map(
        &self,
        request: MapRequest,
        token: &CancellationToken,
    ) -> Result<String, TavilyError> {
        let response = self.api.map(&request, token).await?;
        Ok(response.render())
    }

    /// Fetch account usage and render it
    pub async fn usage(&self, token: &CancellationToken) -> Result<String, TavilyError> {
        let response = self.api.usage(token).await?;
        Ok(response.render())
    }

    /// Call a tool by name with a JSON argument object
    pub async fn call(
        &self,
        name: &str,
        arguments: Value,
        token: &CancellationToken,
    ) -> Result<String, TavilyError> {
        match name.parse::<ToolKind>()? {
            ToolKind::Search => self.search(decode(arguments)?, token).await,
            ToolKind::Extract => self.extract(decode(arguments)?, token).await,
            ToolKind::Crawl => self.crawl(decode(arguments)?, token).await,
            ToolKind::Map => self.map(decode(arguments)?, token).await,
            ToolKind::Usage => self.usage(token).await,
        }
    }
}

fn decode<T: DeserializeOwned>(arguments: Value) -> Result<T, TavilyError> {
    serde_json::from_value(arguments).map_err(TavilyError::InvalidArguments)
}
