//! UI-facing search modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::canonical::EntityKind;

/// The category a user searched in; selects the naming template through the
/// alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Artists,
    Albums,
    Tracks,
    Playlists,
    Label,
}

impl SearchMode {
    pub const ALL: [SearchMode; 5] = [
        SearchMode::Albums,
        SearchMode::Tracks,
        SearchMode::Artists,
        SearchMode::Playlists,
        SearchMode::Label,
    ];

    /// Key in the `[aliases]` table of the format config.
    pub fn alias_key(self) -> &'static str {
        match self {
            SearchMode::Artists => "artists",
            SearchMode::Albums => "albums",
            SearchMode::Tracks => "tracks",
            SearchMode::Playlists => "playlists",
            SearchMode::Label => "label",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            SearchMode::Artists => "Artists",
            SearchMode::Albums => "Albums",
            SearchMode::Tracks => "Tracks",
            SearchMode::Playlists => "Playlists",
            SearchMode::Label => "Label search",
        }
    }

    /// Mode a catalog entity of `kind` is downloaded under.
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Label => SearchMode::Label,
            EntityKind::Album => SearchMode::Albums,
            EntityKind::Artist => SearchMode::Artists,
            EntityKind::Track => SearchMode::Tracks,
            EntityKind::Playlist => SearchMode::Playlists,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias_key())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "artist" | "artists" => Ok(SearchMode::Artists),
            "album" | "albums" => Ok(SearchMode::Albums),
            "track" | "tracks" => Ok(SearchMode::Tracks),
            "playlist" | "playlists" => Ok(SearchMode::Playlists),
            "label" | "labels" => Ok(SearchMode::Label),
            other => Err(format!(
                "unknown search mode {other:?} (expected artists, albums, tracks, playlists or label)"
            )),
        }
    }
}
