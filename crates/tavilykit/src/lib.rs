//! TavilyKit - Tavily API client and tool adapter for agent runtimes
//!
//! This crate wraps the Tavily search, extract, crawl, map and usage
//! endpoints. Responses are decoded into typed values and rendered into
//! flat text blocks that an LLM can read directly.
//!
//! ## Layers
//!
//! - [`types`] - request and response schema, with serde defaults
//! - [`codec`] - wire helpers, including the polymorphic [`Image`] entry
//! - [`ApiClient`] - one HTTP exchange per operation, behind [`TavilyApi`]
//! - [`Render`] - per-response text rendering
//! - [`Tool`] - named tools that decode arguments, call the API and render

pub mod client;
pub mod codec;
mod config;
mod error;
mod render;
mod tool;
pub mod types;

pub use client::{ApiClient, TavilyApi};
pub use codec::Image;
pub use config::{ClientConfig, API_KEY_ENV, BASE_ADDRESS_ENV, DEFAULT_BASE_ADDRESS};
pub use error::TavilyError;
pub use render::{Render, PREVIEW_CHARS};
pub use tool::{Tool, ToolBuilder, ToolKind};
pub use types::{
    Category, ContentFormat, CrawlRequest, CrawlResponse, CrawlScope, ExtractDepth,
    ExtractRequest, ExtractResponse, MapRequest, MapResponse, SearchDepth, SearchRequest,
    SearchResponse, SearchTopic, TimeRange, UsageResponse,
};

/// Re-exported so callers can cancel in-flight operations
pub use tokio_util::sync::CancellationToken;

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = concat!("tavilykit/", env!("CARGO_PKG_VERSION"));

/// Search tool description for LLM consumption
pub const SEARCH_DESCRIPTION: &str = "Real-time web search through Tavily's AI search engine. \
Returns ranked web results with content snippets, and optionally a generated answer, raw page \
content, images and favicons. Supports result count, topic (general or news), time windows and \
domain include/exclude filters.";

/// Extract tool description for LLM consumption
pub const EXTRACT_DESCRIPTION: &str = "Extracts and cleans the raw content of one or more web \
pages, as markdown or plain text. Useful for reading specific URLs in full for data collection \
and research.";

/// Crawl tool description for LLM consumption
pub const CRAWL_DESCRIPTION: &str = "Crawls a site starting from a root URL, following internal \
links outward like a tree. Depth, breadth, total page limit, path and domain regexes, page \
categories and natural language instructions control where it goes. Returns page URLs with \
content previews.";

/// Map tool description for LLM consumption
pub const MAP_DESCRIPTION: &str = "Maps the URL structure of a site starting from a root URL. \
Returns the discovered URLs without page content, for site audits, content discovery and \
understanding navigation.";

/// Usage tool description for LLM consumption
pub const USAGE_DESCRIPTION: &str = "Reports credit usage and limits for the configured API key \
and its account plan.";

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# TavilyKit Tools

Five tools backed by the Tavily API. Every tool returns a single text block.

## search
- `query` (required): search query
- `search_depth`: "basic" (default) or "advanced"
- `topic`: "general" (default) or "news". Forced to "general" when `country` is set
- `days`: days back for the news topic (default 3)
- `time_range`: "day", "week", "month", "year" (or "d", "w", "m", "y")
- `start_date` / `end_date`: YYYY-MM-DD
- `max_results`: 5 to 20 (default 10)
- `include_answer`, `include_images`, `include_image_descriptions`,
  `include_raw_content`, `include_favicon`: booleans (default false)
- `include_domains` / `exclude_domains`: domain lists
- `country`: lowercase English country name to boost

## extract
- `urls` (required): URLs to extract
- `extract_depth`: "basic" (default) or "advanced"
- `format`: "markdown" (default) or "text"
- `include_images`, `include_favicon`: booleans

## crawl
- `url` (required): root URL
- `max_depth` (default 1), `max_breadth` (default 20), `limit` (default 50): all at least 1
- `instructions`: natural language guidance
- `select_paths` / `select_domains`: regex lists
- `allow_external`: follow external links
- `categories`: careers, blog, documentation, about, pricing, community,
  developers, contact, media
- `extract_depth`, `format`, `include_favicon`: as for extract

## map
Same as crawl without `extract_depth`, `format` and `include_favicon`.
Returns URLs only.

## usage
No arguments. Reports key, plan and pay-as-you-go usage.

## Examples

### News search with an answer
```json
{"query": "rust 2024 edition", "topic": "news", "include_answer": true}
```

### Crawl documentation pages
```json
{"url": "https://docs.rs", "max_depth": 2, "categories": ["documentation"]}
```

## Error Handling
- Missing or invalid arguments return an error before any request is sent
- A non-success HTTP status returns an error carrying the status
- A response that cannot be decoded returns a decode error
"#;
