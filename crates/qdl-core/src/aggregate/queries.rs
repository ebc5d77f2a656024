//! Query variants for label discovery.
//!
//! Different phrasings surface different slices of a label's catalog pages,
//! so every variant is always run and the hits are unioned.

/// Collapses whitespace; returns `None` for a blank name.
pub fn normalize_name(name: &str) -> Option<String> {
    let joined = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// The site-restricted phrasings used to find a label's storefront pages.
pub fn label_query_variants(domain: &str, name: &str) -> Vec<String> {
    vec![
        format!("site:{domain} {name} label"),
        format!("site:{domain}/label {name}"),
        format!("site:{domain} {name} record label"),
    ]
}

/// Broad query tried only when none of the variants produced a label page.
pub fn fallback_query(domain: &str, name: &str) -> String {
    format!("{domain} {name}")
}
