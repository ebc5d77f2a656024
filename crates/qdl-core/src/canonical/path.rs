//! Path shape recognition for store and app URLs.

use super::region::is_region_segment;
use super::EntityKind;

/// The "streaming album listing" form of a label page inserts this segment
/// between slug and id; search engines also index spaced/capitalized variants.
const LISTING_MARKER: &str = "download-streaming-albums";

/// Catalog entity recognized in a URL path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathShape {
    pub kind: EntityKind,
    pub slug: Option<String>,
    pub catalog_id: String,
    pub region: Option<String>,
}

/// `/<region>?/<kind-word>/<slug>?/[marker/]<id>` on the storefront host.
pub fn parse_store_path(segments: &[&str]) -> Option<PathShape> {
    let (region, rest) = match segments.split_first() {
        Some((first, rest)) if is_region_segment(first) => (Some(first.to_ascii_lowercase()), rest),
        _ => (None, segments),
    };
    let (kind_word, rest) = rest.split_first()?;
    let kind = EntityKind::from_store_word(&kind_word.to_ascii_lowercase())?;

    let remaining: Vec<&str> = rest
        .iter()
        .copied()
        .filter(|s| !is_listing_marker(s))
        .collect();
    let (slug, id) = match remaining.as_slice() {
        [id] => (None, *id),
        [slug, id] => (Some(normalize_slug(slug)?), *id),
        _ => return None,
    };
    if !is_catalog_id(id) {
        return None;
    }
    Some(PathShape {
        kind,
        slug,
        catalog_id: id.to_string(),
        region,
    })
}

/// `/<kind>/<id>` on the web-player hosts.
pub fn parse_app_path(segments: &[&str]) -> Option<PathShape> {
    match segments {
        [kind, id] => {
            let kind = EntityKind::from_app_word(&kind.to_ascii_lowercase())?;
            if !is_catalog_id(id) {
                return None;
            }
            Some(PathShape {
                kind,
                slug: None,
                catalog_id: id.to_string(),
                region: None,
            })
        }
        _ => None,
    }
}

fn is_listing_marker(seg: &str) -> bool {
    let decoded = percent_decode(seg).to_lowercase();
    let normalized: String = decoded
        .trim()
        .chars()
        .map(|c| if c == ' ' || c == '+' || c == '_' { '-' } else { c })
        .collect();
    normalized == LISTING_MARKER
}

fn is_catalog_id(seg: &str) -> bool {
    !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn normalize_slug(seg: &str) -> Option<String> {
    let slug = seg.trim().to_lowercase();
    if slug.is_empty() || slug == "." || slug == ".." {
        return None;
    }
    Some(slug)
}

/// Lossy `%XX` decoding; malformed escapes are kept as-is.
pub fn percent_decode(seg: &str) -> String {
    let bytes = seg.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|h| u8::from_str_radix(h, 16).ok());
            if let Some(b) = hex {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(path: &str) -> Vec<&str> {
        path.split('/').filter(|s| !s.is_empty()).collect()
    }

    #[test]
    fn label_landing_page() {
        let shape = parse_store_path(&segs("/us-en/label/ninja-tune/38597")).unwrap();
        assert_eq!(shape.kind, EntityKind::Label);
        assert_eq!(shape.slug.as_deref(), Some("ninja-tune"));
        assert_eq!(shape.catalog_id, "38597");
        assert_eq!(shape.region.as_deref(), Some("us-en"));
    }

    #[test]
    fn listing_marker_variants_collapse() {
        for path in [
            "/gb-en/label/ninja-tune/download-streaming-albums/38597",
            "/gb-en/label/ninja-tune/Download-Streaming-Albums/38597",
            "/gb-en/label/ninja-tune/Download%20Streaming%20Albums/38597",
        ] {
            let shape = parse_store_path(&segs(path)).unwrap();
            assert_eq!(shape.slug.as_deref(), Some("ninja-tune"), "{path}");
            assert_eq!(shape.catalog_id, "38597", "{path}");
        }
    }

    #[test]
    fn artist_pages_use_interpreter() {
        let shape = parse_store_path(&segs("/fr-fr/interpreter/astral-projection/22874")).unwrap();
        assert_eq!(shape.kind, EntityKind::Artist);
    }

    #[test]
    fn unknown_shapes_are_rejected() {
        assert!(parse_store_path(&segs("/us-en/news/some-article/123")).is_none());
        assert!(parse_store_path(&segs("/us-en/label")).is_none());
        assert!(parse_store_path(&segs("/us-en/label/a/b/c")).is_none());
        assert!(parse_store_path(&segs("/us-en/album/ten/not-an-id")).is_none());
        assert!(parse_app_path(&segs("/user/library/favorites")).is_none());
    }

    #[test]
    fn app_paths() {
        let shape = parse_app_path(&segs("/album/0060254769402")).unwrap();
        assert_eq!(shape.kind, EntityKind::Album);
        assert_eq!(shape.slug, None);
        assert!(parse_app_path(&segs("/playlist/1234567")).is_some());
    }

    #[test]
    fn percent_decoding() {
        assert_eq!(percent_decode("Download%20Streaming"), "Download Streaming");
        assert_eq!(percent_decode("caf%C3%A9"), "café");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }
}
