//! Request and response schema for the API operations
//!
//! All types are plain values. Requests carry serde defaults so a tool
//! argument object only needs its required fields; responses tolerate
//! missing and `null` members.

mod crawl;
mod extract;
mod map;
mod search;
mod usage;

pub use crawl::{Category, CrawlRequest, CrawlResponse, CrawlResult, CrawlScope};
pub use extract::{
    ContentFormat, ExtractDepth, ExtractRequest, ExtractResponse, ExtractResult, FailedResult,
};
pub use map::{MapRequest, MapResponse};
pub use search::{
    SearchDepth, SearchRequest, SearchResponse, SearchResult, SearchTopic, TimeRange,
};
pub use usage::{AccountUsage, KeyUsage, UsageResponse};

/// Implements `as_str`, `Display` and `FromStr` for a closed wire enum.
///
/// The first string of each arm is the camelCase wire value; any further
/// strings are accepted aliases when parsing.
macro_rules! wire_enum {
    ($ty:ident { $($variant:ident => $wire:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $ty {
            /// Wire value of this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $wire,)+
                }
            }

            /// Every variant, in declaration order
            pub fn all() -> &'static [$ty] {
                &[$($ty::$variant),+]
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.trim().to_lowercase();
                $(
                    if lower == $wire.to_lowercase() $(|| lower == $alias)* {
                        return Ok($ty::$variant);
                    }
                )+
                let expected: Vec<&str> = $ty::all().iter().map(|v| v.as_str()).collect();
                Err(format!(
                    "Invalid {}: {}, expected one of {}",
                    stringify!($ty),
                    s,
                    expected.join(", ")
                ))
            }
        }
    };
}

pub(crate) use wire_enum;
