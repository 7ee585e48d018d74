//! Crawl operation schema
//!
//! [`CrawlScope`] holds the traversal options shared with the map operation.

use super::wire_enum;
use super::{ContentFormat, ExtractDepth};
use crate::codec::nullable;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Predefined page categories for filtering crawled URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Job openings and careers
    Careers,
    /// Blog articles and posts
    Blog,
    /// Documentation, manuals and guides
    Documentation,
    /// About pages
    About,
    /// Pricing and plans
    Pricing,
    /// Forums, discussions and user groups
    Community,
    /// Developer resources, APIs and SDKs
    Developers,
    /// Contact information and forms
    Contact,
    /// Press releases and news
    Media,
}

wire_enum!(Category {
    Careers => "careers",
    Blog => "blog",
    Documentation => "documentation",
    About => "about",
    Pricing => "pricing",
    Community => "community",
    Developers => "developers",
    Contact => "contact",
    Media => "media",
});

fn default_max_depth() -> u32 {
    1
}

fn default_max_breadth() -> u32 {
    20
}

fn default_limit() -> u32 {
    50
}

/// Traversal options shared by crawl and map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CrawlScope {
    /// How far from the base URL the crawler explores. At least 1
    #[serde(default = "default_max_depth")]
    #[schemars(range(min = 1))]
    pub max_depth: u32,

    /// Links followed per level of the tree (per page). At least 1
    #[serde(default = "default_max_breadth")]
    #[schemars(range(min = 1))]
    pub max_breadth: u32,

    /// Total links processed before stopping. At least 1
    #[serde(default = "default_limit")]
    #[schemars(range(min = 1))]
    pub limit: u32,

    /// Natural language instructions for the crawler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Regex patterns selecting URL paths (e.g. /docs/.*, /api/v1.*)
    #[serde(default)]
    pub select_paths: Vec<String>,

    /// Regex patterns selecting domains or subdomains (e.g. ^docs\.example\.com$)
    #[serde(default)]
    pub select_domains: Vec<String>,

    /// Follow links to external domains
    #[serde(default)]
    pub allow_external: bool,

    /// Restrict URLs to these page categories
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Default for CrawlScope {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_breadth: default_max_breadth(),
            limit: default_limit(),
            instructions: None,
            select_paths: Vec::new(),
            select_domains: Vec::new(),
            allow_external: false,
            categories: Vec::new(),
        }
    }
}

impl CrawlScope {
    /// Set the maximum depth
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the maximum breadth
    pub fn max_breadth(mut self, breadth: u32) -> Self {
        self.max_breadth = breadth;
        self
    }

    /// Set the total link limit
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set crawler instructions
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Add a path regex
    pub fn select_path(mut self, pattern: impl Into<String>) -> Self {
        self.select_paths.push(pattern.into());
        self
    }

    /// Add a domain regex
    pub fn select_domain(mut self, pattern: impl Into<String>) -> Self {
        self.select_domains.push(pattern.into());
        self
    }

    /// Follow external links
    pub fn allow_external(mut self) -> Self {
        self.allow_external = true;
        self
    }

    /// Add a category filter
    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }
}

/// Request for the `/crawl` endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CrawlRequest {
    /// The root URL to begin the crawl
    #[schemars(length(min = 1))]
    pub url: String,

    #[serde(flatten)]
    pub scope: CrawlScope,

    /// Extraction depth. 'advanced' retrieves tables and embedded content
    #[serde(default)]
    pub extract_depth: ExtractDepth,

    /// Content format, 'markdown' or 'text'
    #[serde(default)]
    pub format: ContentFormat,

    /// Include the favicon URL of each result
    #[serde(default)]
    pub include_favicon: bool,
}

impl CrawlRequest {
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

    /// Request favicons
    pub fn include_favicon(mut self) -> Self {
        self.include_favicon = true;
        self
    }
}

/// One crawled page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlResult {
    /// Page URL
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,

    /// Extracted content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,

    /// Favicon URL, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

/// Response from the `/crawl` endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlResponse {
    /// URL the crawl started from
    #[serde(default, deserialize_with = "nullable")]
    pub base_url: String,

    /// Crawled pages in discovery order
    #[serde(default, deserialize_with = "nullable")]
    pub results: Vec<CrawlResult>,

    /// Server-side processing time in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
}
