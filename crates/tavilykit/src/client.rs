//! HTTP client for the Tavily API
//!
//! One HTTP exchange per operation: `GET /usage`, and `POST` with a JSON
//! body for `/search`, `/extract`, `/crawl` and `/map`. A non-success status
//! fails the call without reading the body. Nothing is retried and no timeout
//! is imposed beyond what the transport enforces.

use crate::config::ClientConfig;
use crate::error::TavilyError;
use crate::types::{
    CrawlRequest, CrawlResponse, ExtractRequest, ExtractResponse, MapRequest, MapResponse,
    SearchRequest, SearchResponse, UsageResponse,
};
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Method, Request};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};
use url::Url;

/// The five API operations
///
/// [`ApiClient`] is the HTTP implementation. The tool adapter only talks to
/// this trait, so it can run against any other implementation.
#[async_trait]
pub trait TavilyApi: Send + Sync {
    /// `GET /usage`
    async fn usage(&self, token: &CancellationToken) -> Result<UsageResponse, TavilyError>;

    /// `POST /search`
    async fn search(
        &self,
        request: &SearchRequest,
        token: &CancellationToken,
    ) -> Result<SearchResponse, TavilyError>;

    /// `POST /extract`
    async fn extract(
        &self,
        request: &ExtractRequest,
        token: &CancellationToken,
    ) -> Result<ExtractResponse, TavilyError>;

    /// `POST /crawl`
    async fn crawl(
        &self,
        request: &CrawlRequest,
        token: &CancellationToken,
    ) -> Result<CrawlResponse, TavilyError>;

    /// `POST /map`
    async fn map(
        &self,
        request: &MapRequest,
        token: &CancellationToken,
    ) -> Result<MapResponse, TavilyError>;
}

/// Transport-bound API client
///
/// Holds a reqwest client with the bearer credential installed as a default
/// header. Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from a validated configuration
    pub fn new(config: &ClientConfig) -> Result<Self, TavilyError> {
        config.validate()?;
        let base_url = config.base_url()?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key.trim()))
            .map_err(|_| TavilyError::InvalidApiKey)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(TavilyError::ClientBuildError)?;

        Ok(Self { http, base_url })
    }

    /// Base address requests are sent to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, TavilyError> {
        self.base_url
            .join(path)
            .map_err(|e| TavilyError::InvalidBaseAddress(e.to_string()))
    }

    fn get(&self, endpoint: &'static str) -> Result<Request, TavilyError> {
        self.http
            .request(Method::GET, self.endpoint(endpoint)?)
            .build()
            .map_err(TavilyError::from_reqwest)
    }

    fn post<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &'static str,
        body: &T,
    ) -> Result<Request, TavilyError> {
        self.http
            .request(Method::POST, self.endpoint(endpoint)?)
            .json(body)
            .build()
            .map_err(TavilyError::from_reqwest)
    }

    /// Send one request and decode the JSON body, unless the token fires first
    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: Request,
        token: &CancellationToken,
    ) -> Result<T, TavilyError> {
        let method = request.method().clone();
        let exchange = async {
            debug!(%method, endpoint, "Sending request");
            let response = self
                .http
                .execute(request)
                .await
                .map_err(TavilyError::from_reqwest)?;

            let status = response.status();
            debug!(endpoint, status = status.as_u16(), "Received response");
            if !status.is_success() {
                warn!(endpoint, status = status.as_u16(), "Request failed");
                return Err(TavilyError::Status {
                    endpoint,
                    status: status.as_u16(),
                });
            }

            let body = response.bytes().await.map_err(TavilyError::from_reqwest)?;
            serde_json::from_slice(&body).map_err(|source| {
                error!(endpoint, error = %source, "Failed to decode response");
                TavilyError::Decode { endpoint, source }
            })
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!(endpoint, "Request cancelled");
                Err(TavilyError::Cancelled)
            }
            result = exchange => result,
        }
    }

    /// Fetch API key and account usage
    pub async fn usage(&self, token: &CancellationToken) -> Result<UsageResponse, TavilyError> {
        let request = self.get("usage")?;
        self.execute("usage", request, token).await
    }

    /// Run a web search
    pub async fn search(
        &self,
        request: &SearchRequest,
        token: &CancellationToken,
    ) -> Result<SearchResponse, TavilyError> {
        let request = self.post("search", request)?;
        self.execute("search", request, token).await
    }

    /// Extract content from URLs
    pub async fn extract(
        &self,
        request: &ExtractRequest,
        token: &CancellationToken,
    ) -> Result<ExtractResponse, TavilyError> {
        let request = self.post("extract", request)?;
        self.execute("extract", request, token).await
    }

    /// Crawl a site from a root URL
    pub async fn crawl(
        &self,
        request: &CrawlRequest,
        token: &CancellationToken,
    ) -> Result<CrawlResponse, TavilyError> {
        let request = self.post("crawl", request)?;
        self.execute("crawl", request, token).await
    }

    /// Map the URLs of a site from a root URL
    pub async fn map(
        &self,
        request: &MapRequest,
        token: &CancellationToken,
    ) -> Result<MapResponse, TavilyError> {
        let request = self.post("map", request)?;
        self.execute("map", request, token).await
    }
}

#[async_trait]
impl TavilyApi for ApiClient {
    async fn usage(&self, token: &CancellationToken) -> Result<UsageResponse, TavilyError> {
        ApiClient::usage(self, token).await
    }

    async fn search(
        &self,
        request: &SearchRequest,
        token: &CancellationToken,
    ) -> Result<SearchResponse, TavilyError> {
        ApiClient::search(self, request, token).await
    }

    async fn extract(
        &self,
        request: &ExtractRequest,
        token: &CancellationToken,
    ) -> Result<ExtractResponse, TavilyError> {
        ApiClient::extract(self, request, token).await
    }

    async fn crawl(
        &self,
        request: &CrawlRequest,
        token: &CancellationToken,
    ) -> Result<CrawlResponse, TavilyError> {
        ApiClient::crawl(self, request, token).await
    }

    async fn map(
        &self,
        request: &MapRequest,
        token: &CancellationToken,
    ) -> Result<MapResponse, TavilyError> {
        ApiClient::map(self, request, token).await
    }
}
