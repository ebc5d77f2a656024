//! Naming configuration (`format.toml`): templates plus the mode alias table.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

use super::SearchMode;

pub const DEFAULT_FOLDER_FORMAT: &str = "{artist} - {album} ({year}) [{bit_depth}B-{sampling_rate}kHz]";
pub const DEFAULT_TRACK_FORMAT: &str = "{tracknumber}. {tracktitle}";

/// Formatting rules shared by one or more search modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingTemplate {
    pub folder_format: String,
    pub track_format: String,
    /// Independent toggle: an empty or non-empty `top_folder_format` never implies it.
    #[serde(default)]
    pub create_top_folder: bool,
    #[serde(default)]
    pub top_folder_format: String,
}

impl NamingTemplate {
    /// Used when neither the alias nor the default key names a template.
    pub fn fallback() -> Self {
        Self {
            folder_format: DEFAULT_FOLDER_FORMAT.to_string(),
            track_format: DEFAULT_TRACK_FORMAT.to_string(),
            create_top_folder: false,
            top_folder_format: String::new(),
        }
    }
}

/// `format.toml`: `default_naming_mode`, `[aliases]` (mode → template key)
/// and `[templates.<key>]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Template key used for modes without an alias.
    pub default_naming_mode: String,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub templates: BTreeMap<String, NamingTemplate>,
}

fn template(folder: &str, track: &str, top: Option<&str>) -> NamingTemplate {
    NamingTemplate {
        folder_format: folder.to_string(),
        track_format: track.to_string(),
        create_top_folder: top.is_some(),
        top_folder_format: top.unwrap_or_default().to_string(),
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        let aliases = [
            (SearchMode::Artists, "artist_discography_dg"),
            (SearchMode::Albums, "artist_album_release"),
            (SearchMode::Tracks, "single_track_trk"),
            (SearchMode::Playlists, "playlists_pls"),
            (SearchMode::Label, "label_discography_lpk"),
        ]
        .into_iter()
        .map(|(mode, key)| (mode.alias_key().to_string(), key.to_string()))
        .collect();

        let templates = [
            (
                "label_discography_lpk",
                template(
                    "({year}) {artist} - {album} [{bit_depth}B-{sampling_rate}kHz]",
                    "{tracknumber}. {artist} - {tracktitle}",
                    Some("Label - {label}"),
                ),
            ),
            (
                "artist_discography_dg",
                template(
                    "{artist} - ({year}) {album} [{bit_depth}B-{sampling_rate}kHz]",
                    "{tracknumber}. {artist} - {tracktitle}",
                    Some("{artist}"),
                ),
            ),
            (
                "artist_album_release",
                template(DEFAULT_FOLDER_FORMAT, DEFAULT_TRACK_FORMAT, None),
            ),
            (
                "single_track_trk",
                template("{artist} - {album}", "{artist} - {tracktitle}", None),
            ),
            (
                "playlists_pls",
                template(
                    "{artist} - {album}",
                    "{tracknumber}. {artist} - {tracktitle}",
                    Some("{playlist}"),
                ),
            ),
        ]
        .into_iter()
        .map(|(key, t)| (key.to_string(), t))
        .collect();

        Self {
            default_naming_mode: "artist_discography_dg".to_string(),
            aliases,
            templates,
        }
    }
}

impl FormatConfig {
    /// Template key for `mode`: its alias, else `default_naming_mode`.
    pub fn template_key(&self, mode: SearchMode) -> &str {
        self.aliases
            .get(mode.alias_key())
            .map(String::as_str)
            .unwrap_or(&self.default_naming_mode)
    }

    /// Template for `mode` and the key it was found under. Falls back to the
    /// default key, then to the built-in template (`None` key).
    pub fn template_for(&self, mode: SearchMode) -> (Option<&str>, Cow<'_, NamingTemplate>) {
        let key = self.template_key(mode);
        if let Some(t) = self.templates.get(key) {
            return (Some(key), Cow::Borrowed(t));
        }
        if let Some(t) = self.templates.get(&self.default_naming_mode) {
            tracing::debug!(mode = %mode, key, "no template for alias; using default naming mode");
            return (Some(self.default_naming_mode.as_str()), Cow::Borrowed(t));
        }
        tracing::debug!(mode = %mode, key, "no template configured; using built-in fallback");
        (None, Cow::Owned(NamingTemplate::fallback()))
    }
}
