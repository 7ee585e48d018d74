//! Search operation schema

use super::wire_enum;
use crate::codec::{nullable, Image};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Depth of the search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SearchDepth {
    /// Basic search
    #[default]
    Basic,
    /// Advanced search, slower but more thorough
    Advanced,
}

wire_enum!(SearchDepth { Basic => "basic", Advanced => "advanced" });

/// Search category, selects which search agent runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SearchTopic {
    /// General web search
    #[default]
    General,
    /// News search, honours `days`
    News,
}

wire_enum!(SearchTopic { General => "general", News => "news" });

/// Time range back from the current date
///
/// The single-letter forms are accepted on input and encode as the long form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum TimeRange {
    /// Last day
    #[serde(alias = "d")]
    Day,
    /// Last week
    #[serde(alias = "w")]
    Week,
    /// Last month
    #[serde(alias = "m")]
    Month,
    /// Last year
    #[serde(alias = "y")]
    Year,
}

wire_enum!(TimeRange {
    Day => "day" | "d",
    Week => "week" | "w",
    Month => "month" | "m",
    Year => "year" | "y",
});

fn default_days() -> u32 {
    3
}

fn default_max_results() -> u32 {
    10
}

/// Request for the `/search` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchRequest {
    /// Search query
    #[schemars(length(min = 1))]
    pub query: String,

    /// The depth of the search, 'basic' or 'advanced'
    #[serde(default)]
    pub search_depth: SearchDepth,

    /// Include an LLM-generated answer to the query
    #[serde(default)]
    pub include_answer: bool,

    /// Search category, 'general' or 'news'. Forced to 'general' when `country` is set
    #[serde(default)]
    pub topic: SearchTopic,

    /// Number of days back to include. Only used by the 'news' topic
    #[serde(default = "default_days")]
    pub days: u32,

    /// Time range back from the current date, for both topics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,

    /// Only return results published after this date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// Only return results published before this date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Maximum number of results, between 5 and 20
    #[serde(default = "default_max_results")]
    #[schemars(range(min = 5, max = 20))]
    pub max_results: u32,

    /// Include query-related images
    #[serde(default)]
    pub include_images: bool,

    /// Include query-related images with descriptions
    #[serde(default)]
    pub include_image_descriptions: bool,

    /// Include the cleaned and parsed HTML content of each result
    #[serde(default)]
    pub include_raw_content: bool,

    /// Domains to restrict the search to
    #[serde(default)]
    pub include_domains: Vec<String>,

    /// Domains to exclude from the search
    #[serde(default)]
    pub exclude_domains: Vec<String>,

    /// Boost results from a country (lowercase English name, e.g. "united kingdom")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Include the favicon URL of each result
    #[serde(default)]
    pub include_favicon: bool,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            search_depth: SearchDepth::default(),
            include_answer: false,
            topic: SearchTopic::default(),
            days: default_days(),
            time_range: None,
            start_date: None,
            end_date: None,
            max_results: default_max_results(),
            include_images: false,
            include_image_descriptions: false,
            include_raw_content: false,
            include_domains: Vec::new(),
            exclude_domains: Vec::new(),
            country: None,
            include_favicon: false,
        }
    }
}

impl SearchRequest {
    /// Create a new request for the given query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the search depth
    pub fn search_depth(mut self, depth: SearchDepth) -> Self {
        self.search_depth = depth;
        self
    }

    /// Set the topic
    pub fn topic(mut self, topic: SearchTopic) -> Self {
        self.topic = topic;
        self
    }

    /// Set the news lookback in days
    pub fn days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Set the time range
    pub fn time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    /// Set the start date (YYYY-MM-DD)
    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Set the end date (YYYY-MM-DD)
    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Set the maximum number of results
    pub fn max_results(mut self, max: u32) -> Self {
        self.max_results = max;
        self
    }

    /// Request an LLM-generated answer
    pub fn include_answer(mut self) -> Self {
        self.include_answer = true;
        self
    }

    /// Request images
    pub fn include_images(mut self) -> Self {
        self.include_images = true;
        self
    }

    /// Request image descriptions
    pub fn include_image_descriptions(mut self) -> Self {
        self.include_image_descriptions = true;
        self
    }

    /// Request raw content for each result
    pub fn include_raw_content(mut self) -> Self {
        self.include_raw_content = true;
        self
    }

    /// Request favicons
    pub fn include_favicon(mut self) -> Self {
        self.include_favicon = true;
        self
    }

    /// Add a domain to the include list
    pub fn include_domain(mut self, domain: impl Into<String>) -> Self {
        self.include_domains.push(domain.into());
        self
    }

    /// Add a domain to the exclude list
    pub fn exclude_domain(mut self, domain: impl Into<String>) -> Self {
        self.exclude_domains.push(domain.into());
        self
    }

    /// Set the country booster
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Normalize the request once all fields are set.
    ///
    /// A non-empty `country` forces `topic` to general.
    pub fn finalize(mut self) -> Self {
        if self.country.as_deref().is_some_and(|c| !c.is_empty()) {
            self.topic = SearchTopic::General;
        }
        self
    }
}

/// Single search hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,

    /// Page URL
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,

    /// Content snippet
    #[serde(default, deserialize_with = "nullable")]
    pub content: String,

    /// Parsed page content, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,

    /// Favicon URL, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    /// Relevance score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Response from the `/search` endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query that was run
    #[serde(default, deserialize_with = "nullable")]
    pub query: String,

    /// Generated answer, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// Query-related images
    #[serde(default, deserialize_with = "nullable")]
    pub images: Vec<Image>,

    /// Search hits in rank order
    #[serde(default, deserialize_with = "nullable")]
    pub results: Vec<SearchResult>,

    /// Server-side processing time in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
}
