//! Human-readable titles for canonical results.

use super::path::percent_decode;
use super::CanonicalUrl;

/// Separators search engines append site names with.
const SITE_SUFFIXES: [&str; 3] = [" | ", " - Qobuz", " – Qobuz"];

/// Display title for a canonical entity: the slug in title case when the URL
/// had one (`ninja-tune` → `Ninja Tune`), otherwise the search hit title
/// without its site suffix, otherwise the canonical id.
pub fn display_title(canonical: &CanonicalUrl, hit_title: &str) -> String {
    canonical
        .slug
        .as_deref()
        .and_then(title_from_slug)
        .or_else(|| clean_hit_title(hit_title))
        .unwrap_or_else(|| canonical.id.clone())
}

fn title_from_slug(slug: &str) -> Option<String> {
    let decoded = percent_decode(slug);
    let words: Vec<String> = decoded
        .split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn clean_hit_title(title: &str) -> Option<String> {
    let mut cut = title.len();
    for sep in SITE_SUFFIXES {
        if let Some(pos) = title.find(sep) {
            cut = cut.min(pos);
        }
    }
    let cleaned = title[..cut].trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
