//! Folder and track naming.
//!
//! `NamingResolver::resolve` picks the template for a search mode through the
//! alias table, substitutes the job's tags and sanitizes every resulting path
//! segment. It never fails: missing tags render as empty text and blank
//! segments fall back to the tag key name.

mod config;
mod mode;
mod sanitize;
mod template;

pub use config::{FormatConfig, NamingTemplate, DEFAULT_FOLDER_FORMAT, DEFAULT_TRACK_FORMAT};
pub use mode::SearchMode;
pub use sanitize::{replace_illegal, sanitize_segment};
pub use template::{Tags, Template};

use std::fmt;
use std::path::{Path, PathBuf};

/// Track file name template with the job-level tags already applied. The
/// placeholders left are filled per track by `render`; everything already
/// substituted is free of path separators and reserved characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPattern {
    template: Template,
}

impl TrackPattern {
    /// Sanitized file stem for one track (no extension).
    pub fn render(&self, track_tags: &Tags) -> String {
        let raw = self.template.render(track_tags);
        sanitize_segment(&raw, self.template.first_placeholder().unwrap_or("track"))
    }
}

impl fmt::Display for TrackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.template.fmt(f)
    }
}

/// Names for one download job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Present only when the template enables `create_top_folder`.
    pub top_folder: Option<String>,
    pub sub_folder: String,
    pub track_pattern: TrackPattern,
}

impl ResolvedName {
    /// `root/[top_folder/]sub_folder`.
    pub fn folder_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        if let Some(top) = &self.top_folder {
            path.push(top);
        }
        path.push(&self.sub_folder);
        path
    }
}

#[derive(Debug, Clone, Default)]
pub struct NamingResolver {
    config: FormatConfig,
}

impl NamingResolver {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    pub fn resolve(&self, mode: SearchMode, tags: &Tags) -> ResolvedName {
        let (key, template) = self.config.template_for(mode);
        tracing::debug!(mode = %mode, template = key.unwrap_or("<built-in>"), "resolving names");

        let top_folder = template
            .create_top_folder
            .then(|| render_segment(&template.top_folder_format, tags, "label"));
        let sub_folder = render_segment(&template.folder_format, tags, "album");
        let track_pattern = TrackPattern {
            template: Template::parse(&template.track_format).apply_known(tags, replace_illegal),
        };

        ResolvedName {
            top_folder,
            sub_folder,
            track_pattern,
        }
    }
}

fn render_segment(format: &str, tags: &Tags, default_key: &str) -> String {
    let template = Template::parse(format);
    let fallback = template.first_placeholder().unwrap_or(default_key);
    sanitize_segment(&template.render(tags), fallback)
}
