//! Path segment sanitization for folder and file names.

/// Longest segment most filesystems accept (bytes).
const NAME_MAX: usize = 255;

const RESERVED_DEVICE_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Makes `raw` usable as a single file or directory name on Linux, macOS and
/// Windows. Never returns an empty string: a blank result falls back to the
/// sanitized `fallback` (a tag key name), then to `"untitled"`.
///
/// - Replaces `/ \ : * ? " < > |` and control characters with `_`
/// - Trims surrounding whitespace and leading/trailing dots
/// - Suffixes reserved device names (`CON`, `NUL`, `COM1`...) with `_`
/// - Limits length to 255 bytes
pub fn sanitize_segment(raw: &str, fallback: &str) -> String {
    let cleaned = clean(raw);
    if !cleaned.is_empty() {
        return cleaned;
    }
    let fallback = clean(fallback);
    if fallback.is_empty() {
        "untitled".to_string()
    } else {
        fallback
    }
}

/// Replaces path separators, reserved punctuation and control characters
/// with `_`. Unlike `sanitize_segment` it neither trims nor falls back, so
/// it suits fragments that end up inside a longer name.
pub fn replace_illegal(fragment: &str) -> String {
    fragment
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn clean(name: &str) -> String {
    let replaced = replace_illegal(name);

    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');

    let mut out = if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].trim_end().to_string()
    } else {
        trimmed.to_string()
    };

    let stem = out.split('.').next().unwrap_or("").to_ascii_uppercase();
    if RESERVED_DEVICE_NAMES.contains(&stem.as_str()) {
        out.insert(stem.len(), '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_ordinary_names() {
        assert_eq!(sanitize_segment("Astral Projection - Ten", "album"), "Astral Projection - Ten");
        assert_eq!(sanitize_segment("(1997) Dancing Galaxy", "album"), "(1997) Dancing Galaxy");
    }

    #[test]
    fn replaces_illegal_characters() {
        assert_eq!(sanitize_segment("AC/DC: Live?", "artist"), "AC_DC_ Live_");
        assert_eq!(sanitize_segment("a\u{0}b\nc", "x"), "a_b_c");
    }

    #[test]
    fn fragments_keep_their_edges() {
        assert_eq!(replace_illegal(" AC/DC "), " AC_DC ");
        assert_eq!(replace_illegal("..\\x"), ".._x");
        assert_eq!(replace_illegal(""), "");
    }

    #[test]
    fn trims_whitespace_and_dots() {
        assert_eq!(sanitize_segment("Astral Projection - ", "album"), "Astral Projection -");
        assert_eq!(sanitize_segment("  ..hidden.. ", "x"), "hidden");
    }

    #[test]
    fn blank_falls_back_to_key_name() {
        assert_eq!(sanitize_segment("", "album"), "album");
        assert_eq!(sanitize_segment(" . ", "label"), "label");
        assert_eq!(sanitize_segment("", ""), "untitled");
    }

    #[test]
    fn reserved_device_names_are_suffixed() {
        assert_eq!(sanitize_segment("CON", "x"), "CON_");
        assert_eq!(sanitize_segment("nul.txt", "x"), "nul_.txt");
        assert_eq!(sanitize_segment("Console", "x"), "Console");
    }

    #[test]
    fn long_names_are_cut_on_char_boundary() {
        let long = "é".repeat(200);
        let out = sanitize_segment(&long, "x");
        assert!(out.len() <= 255);
        assert!(out.chars().all(|c| c == 'é'));
    }
}
