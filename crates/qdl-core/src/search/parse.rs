//! Parse the JSON body of a search endpoint into raw hits.

use serde::Deserialize;

use super::{RawHit, SearchError};

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    results: Vec<ResultEntry>,
}

#[derive(Debug, Deserialize)]
struct ResultEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Extracts up to `max_results` `(title, url)` pairs from a SearXNG-style
/// `{"results": [{"title": ..., "url": ...}]}` body. Entries without a URL
/// are skipped; a missing title becomes empty.
pub fn parse_results(body: &[u8], max_results: usize) -> Result<Vec<RawHit>, SearchError> {
    let parsed: ResponseBody =
        serde_json::from_slice(body).map_err(|e| SearchError::Malformed(e.to_string()))?;
    Ok(parsed
        .results
        .into_iter()
        .filter_map(|entry| {
            let url = entry.url?.trim().to_string();
            if url.is_empty() {
                return None;
            }
            Some(RawHit {
                title: entry.title.unwrap_or_default().trim().to_string(),
                url,
            })
        })
        .take(max_results)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_results_and_truncates() {
        let body = br#"{
            "query": "site:qobuz.com ninja tune label",
            "results": [
                {"title": "Ninja Tune | Qobuz", "url": "https://www.qobuz.com/us-en/label/ninja-tune/38597", "engine": "x"},
                {"title": "Other", "url": "https://www.qobuz.com/gb-en/label/ninja-tune/38597"},
                {"title": "Third", "url": "https://example.com"}
            ]
        }"#;
        let hits = parse_results(body, 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Ninja Tune | Qobuz");
        assert_eq!(hits[1].url, "https://www.qobuz.com/gb-en/label/ninja-tune/38597");
    }

    #[test]
    fn skips_entries_without_url() {
        let body = br#"{"results": [{"title": "no url"}, {"url": "  "}, {"url": "https://a.example"}]}"#;
        let hits = parse_results(body, 10).unwrap();
        assert_eq!(hits, vec![RawHit::new("", "https://a.example")]);
    }

    #[test]
    fn missing_results_is_empty() {
        assert!(parse_results(b"{}", 5).unwrap().is_empty());
    }

    #[test]
    fn html_body_is_malformed() {
        let err = parse_results(b"<html>rate limited</html>", 5).unwrap_err();
        assert!(matches!(err, SearchError::Malformed(_)));
    }
}
