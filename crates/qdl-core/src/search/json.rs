//! JSON web-search endpoint over libcurl.

use std::time::Duration;

use crate::config::SearchConfig;

use super::{parse_results, RawHit, SearchEngine, SearchError};

/// Talks to a SearXNG-compatible endpoint: `GET <endpoint>?q=..&format=json`.
///
/// Blocking; the aggregator runs it inside `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct JsonSearchEngine {
    endpoint: url::Url,
    language: String,
    timeout: Duration,
}

impl JsonSearchEngine {
    pub fn new(endpoint: &str, language: &str, timeout: Duration) -> Result<Self, SearchError> {
        let parsed = url::Url::parse(endpoint).map_err(|e| SearchError::Endpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SearchError::Endpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        Ok(Self {
            endpoint: parsed,
            language: language.to_string(),
            timeout,
        })
    }

    pub fn from_config(cfg: &SearchConfig) -> Result<Self, SearchError> {
        Self::new(
            &cfg.endpoint,
            &cfg.language,
            Duration::from_secs(cfg.timeout_secs.max(1)),
        )
    }

    /// Full request URL for `query`.
    pub fn request_url(&self, query: &str) -> url::Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("language", &self.language);
        url
    }

    fn fetch(&self, query: &str) -> Result<Vec<u8>, SearchError> {
        let mut body = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(self.request_url(query).as_str())?;
        easy.follow_location(true)?;
        easy.connect_timeout(Duration::from_secs(10).min(self.timeout))?;
        easy.timeout(self.timeout)?;
        easy.useragent(concat!("qdl/", env!("CARGO_PKG_VERSION")))?;

        let mut list = curl::easy::List::new();
        list.append("Accept: application/json")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(SearchError::Http(code));
        }
        Ok(body)
    }
}

impl SearchEngine for JsonSearchEngine {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawHit>, SearchError> {
        tracing::debug!(query, "search request");
        let body = self.fetch(query)?;
        let hits = parse_results(&body, max_results)?;
        tracing::debug!(query, hits = hits.len(), "search response");
        Ok(hits)
    }
}
