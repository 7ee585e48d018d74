//! Text rendering of decoded responses
//!
//! Each response type renders to an ordered list of lines, joined with `\n`
//! into the single text block handed back to the tool caller. Rendering is a
//! pure function of the response. Empty strings count as absent.

use crate::codec::non_empty;
use crate::types::{CrawlResponse, ExtractResponse, MapResponse, SearchResponse, UsageResponse};

/// Characters of crawled content shown before truncating
pub const PREVIEW_CHARS: usize = 200;

/// Render a decoded response as text lines
pub trait Render {
    /// Ordered output lines
    fn lines(&self) -> Vec<String>;

    /// Lines joined into one text block
    fn render(&self) -> String {
        self.lines().join("\n")
    }
}

impl Render for SearchResponse {
    fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();

        if let Some(answer) = non_empty(&self.answer) {
            out.push(format!("Answer: {answer}"));
        }

        out.push("Detailed Results:".to_string());
        for result in &self.results {
            out.push(format!("\nTitle: {}", result.title));
            out.push(format!("URL: {}", result.url));
            out.push(format!("Content: {}", result.content));
            if let Some(raw) = non_empty(&result.raw_content) {
                out.push(format!("Raw Content: {raw}"));
            }
            if let Some(favicon) = non_empty(&result.favicon) {
                out.push(format!("Favicon: {favicon}"));
            }
        }

        if !self.images.is_empty() {
            out.push("\nImages:".to_string());
            for (i, image) in self.images.iter().enumerate() {
                out.push(format!("\n[{}] URL: {}", i + 1, image.url));
                if let Some(description) = image.description() {
                    out.push(format!("   Description: {description}"));
                }
            }
        }

        out
    }
}

impl Render for ExtractResponse {
    fn lines(&self) -> Vec<String> {
        let mut out = vec!["Detailed Results:".to_string()];

        for result in &self.results {
            out.push(format!("URL: {}", result.url));
            if let Some(raw) = non_empty(&result.raw_content) {
                out.push(format!("Raw Content: {raw}"));
            }
            if let Some(favicon) = non_empty(&result.favicon) {
                out.push(format!("Favicon: {favicon}"));
            }
            if !result.images.is_empty() {
                out.push("\nImages:".to_string());
                for (i, image) in result.images.iter().enumerate() {
                    out.push(format!("\n[{}] URL: {}", i + 1, image));
                }
            }
        }

        if !self.failed_results.is_empty() {
            out.push("\nFailed Results:".to_string());
            for failed in &self.failed_results {
                match non_empty(&failed.error) {
                    Some(error) => out.push(format!("URL: {} ({error})", failed.url)),
                    None => out.push(format!("URL: {}", failed.url)),
                }
            }
        }

        out
    }
}

impl Render for CrawlResponse {
    fn lines(&self) -> Vec<String> {
        let mut out = vec![
            "Crawl Results:".to_string(),
            format!("Base URL: {}", self.base_url),
            "\nCrawled Pages:".to_string(),
        ];

        for (i, page) in self.results.iter().enumerate() {
            out.push(format!("\n[{}] URL: {}", i + 1, page.url));
            if let Some(raw) = non_empty(&page.raw_content) {
                out.push(format!("Content: {}", preview(raw)));
            }
            if let Some(favicon) = non_empty(&page.favicon) {
                out.push(format!("Favicon: {favicon}"));
            }
        }

        out
    }
}

impl Render for MapResponse {
    fn lines(&self) -> Vec<String> {
        let mut out = vec![
            "Site Map Results:".to_string(),
            format!("Base URL: {}", self.base_url),
            "\nMapped Pages:".to_string(),
        ];

        for (i, url) in self.results.iter().enumerate() {
            out.push(format!("\n[{}] URL: {}", i + 1, url));
        }

        out
    }
}

impl Render for UsageResponse {
    fn lines(&self) -> Vec<String> {
        vec![
            "Usage:".to_string(),
            format!("Plan: {}", self.plan_name().unwrap_or("n/a")),
            format!("Key: {}", ratio(self.key_usage(), self.key_limit())),
            format!("Plan Usage: {}", ratio(self.plan_usage(), self.plan_limit())),
            format!(
                "Pay-as-you-go: {}",
                ratio(self.paygo_usage(), self.paygo_limit())
            ),
        ]
    }
}

/// First [`PREVIEW_CHARS`] characters, with `...` appended when cut
fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => format!("{}...", &content[..end]),
        None => content.to_string(),
    }
}

fn ratio(used: Option<f64>, limit: Option<f64>) -> String {
    format!("{} / {}", figure(used), figure(limit))
}

fn figure(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}
