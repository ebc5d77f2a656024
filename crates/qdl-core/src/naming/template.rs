//! `{tag}` template grammar.
//!
//! A format string is literal text with `{tag}` placeholders. `{{` and `}}`
//! are literal braces; a `{` without a closing `}` is kept as text. Parsing
//! never fails.

use std::collections::BTreeMap;
use std::fmt;

/// Tag values for one download job or track, keyed by lowercase tag name.
pub type Tags = BTreeMap<String, String>;

/// Tag names that mean the same thing; the naming config historically used
/// both spellings.
const TAG_ALIASES: [(&str, &str); 2] = [("bitdepth", "bit_depth"), ("samplerate", "sampling_rate")];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for n in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if closed && !name.trim().is_empty() && !name.contains('{') {
                        flush(&mut segments, &mut text);
                        segments.push(Segment::Placeholder(name.trim().to_ascii_lowercase()));
                    } else {
                        text.push('{');
                        text.push_str(&name);
                        if closed {
                            text.push('}');
                        }
                    }
                }
                _ => text.push(c),
            }
        }
        flush(&mut segments, &mut text);
        Self { segments }
    }

    /// Substitutes every placeholder; unknown tags become empty strings.
    pub fn render(&self, tags: &Tags) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(t) => out.push_str(t),
                Segment::Placeholder(name) => {
                    if let Some(v) = lookup(tags, name) {
                        out.push_str(v);
                    }
                }
            }
        }
        out
    }

    /// Substitutes the placeholders `tags` has values for and keeps the rest.
    /// `clean` is applied to every piece of emitted text, literal or
    /// substituted; kept placeholders pass through untouched.
    pub fn apply_known(&self, tags: &Tags, clean: impl Fn(&str) -> String) -> Template {
        let mut segments = Vec::new();
        let mut text = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(t) => text.push_str(&clean(t)),
                Segment::Placeholder(name) => match lookup(tags, name) {
                    Some(v) => text.push_str(&clean(v)),
                    None => {
                        flush(&mut segments, &mut text);
                        segments.push(Segment::Placeholder(name.clone()));
                    }
                },
            }
        }
        flush(&mut segments, &mut text);
        Template { segments }
    }

    /// Name of the first placeholder, used as the fallback segment name.
    pub fn first_placeholder(&self) -> Option<&str> {
        self.segments.iter().find_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Re-emits the template source, escaping literal braces.
impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Text(t) => f.write_str(&t.replace('{', "{{").replace('}', "}}"))?,
                Segment::Placeholder(name) => write!(f, "{{{name}}}")?,
            }
        }
        Ok(())
    }
}

fn flush(segments: &mut Vec<Segment>, text: &mut String) {
    if !text.is_empty() {
        segments.push(Segment::Text(std::mem::take(text)));
    }
}

fn lookup<'a>(tags: &'a Tags, name: &str) -> Option<&'a str> {
    if let Some(v) = tags.get(name) {
        return Some(v.as_str());
    }
    if let Some((k, v)) = tags.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
        tracing::trace!(tag = %k, "case-insensitive tag match");
        return Some(v.as_str());
    }
    TAG_ALIASES.iter().find_map(|&(a, b)| {
        let other = if name == a {
            b
        } else if name == b {
            a
        } else {
            return None;
        };
        tags.get(other).map(String::as_str)
    })
}
