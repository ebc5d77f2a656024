//! Web-search transport.
//!
//! The aggregator only depends on the `SearchEngine` trait; any closure of
//! the shape `(query, max_results) -> Result<Vec<RawHit>, SearchError>`
//! implements it, which is how tests and other front-ends plug in. The
//! bundled implementation talks to a JSON search endpoint over libcurl.

mod error;
mod json;
mod parse;

pub use error::SearchError;
pub use json::JsonSearchEngine;
pub use parse::parse_results;

use serde::{Deserialize, Serialize};

/// One `(title, url)` pair as returned by a search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHit {
    pub title: String,
    pub url: String,
}

impl RawHit {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// A raw hit tagged with the query that surfaced it. Discarded after canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub raw_url: String,
    pub source_query: String,
}

impl SearchHit {
    pub fn from_raw(hit: RawHit, source_query: &str) -> Self {
        Self {
            title: hit.title,
            raw_url: hit.url,
            source_query: source_query.to_string(),
        }
    }
}

/// Query function consumed by the aggregator. Output is untrusted: any shape
/// of URL may come back.
pub trait SearchEngine: Send + Sync {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawHit>, SearchError>;
}

impl<F> SearchEngine for F
where
    F: Fn(&str, usize) -> Result<Vec<RawHit>, SearchError> + Send + Sync,
{
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawHit>, SearchError> {
        self(query, max_results)
    }
}
