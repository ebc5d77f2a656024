//! Storefront region segments (`us-en`, `gb-en`, `de-de`, ...).

/// True for a `<country>-<language>` pair of ASCII letters, any case.
pub fn is_region_segment(seg: &str) -> bool {
    let b = seg.as_bytes();
    b.len() == 5
        && b[0].is_ascii_alphabetic()
        && b[1].is_ascii_alphabetic()
        && b[2] == b'-'
        && b[3].is_ascii_alphabetic()
        && b[4].is_ascii_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_region_pairs() {
        for r in ["us-en", "gb-en", "de-de", "se-en", "ar-es", "fr-fr", "US-EN"] {
            assert!(is_region_segment(r), "{r}");
        }
    }

    #[test]
    fn rejects_other_segments() {
        for s in ["label", "en", "us_en", "us-eng", "u1-en", "", "album"] {
            assert!(!is_region_segment(s), "{s}");
        }
    }
}
