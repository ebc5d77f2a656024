//! Things the selector can list.

use serde::{Deserialize, Serialize};

use crate::aggregate::CanonicalResult;
use crate::canonical::{Canonicalizer, EntityKind};
use crate::naming::{SearchMode, Tags};

/// What the selector shows for one row. The row's position in the list
/// handed to the selector is its stable index.
pub trait Selectable {
    fn title(&self) -> String;

    fn subtitle(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub albums_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumItem {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub duration_secs: Option<u64>,
    #[serde(default)]
    pub hires: bool,
    #[serde(default)]
    pub bit_depth: Option<u32>,
    #[serde(default)]
    pub sampling_rate: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackItem {
    pub id: String,
    pub title: String,
    pub performer: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration_secs: Option<u64>,
    #[serde(default)]
    pub hires: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tracks_count: Option<u32>,
}

/// One listable catalog entry, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SelectableItem {
    Artist(ArtistItem),
    Album(AlbumItem),
    Track(TrackItem),
    Playlist(PlaylistItem),
    Label(CanonicalResult),
}

impl SelectableItem {
    pub fn kind(&self) -> EntityKind {
        match self {
            SelectableItem::Artist(_) => EntityKind::Artist,
            SelectableItem::Album(_) => EntityKind::Album,
            SelectableItem::Track(_) => EntityKind::Track,
            SelectableItem::Playlist(_) => EntityKind::Playlist,
            SelectableItem::Label(r) => r.kind,
        }
    }

    pub fn catalog_id(&self) -> &str {
        match self {
            SelectableItem::Artist(a) => &a.id,
            SelectableItem::Album(a) => &a.id,
            SelectableItem::Track(t) => &t.id,
            SelectableItem::Playlist(p) => &p.id,
            SelectableItem::Label(r) => r.catalog_id(),
        }
    }

    pub fn mode(&self) -> SearchMode {
        SearchMode::for_kind(self.kind())
    }

    /// Aggregated results keep their canonical URL; listings point at the
    /// web player.
    pub fn url(&self, canonicalizer: &Canonicalizer) -> String {
        match self {
            SelectableItem::Label(r) => r.canonical_url.clone(),
            other => canonicalizer.app_url(other.kind(), other.catalog_id()),
        }
    }

    /// Job-level naming tags known from the listing alone.
    pub fn naming_tags(&self) -> Tags {
        let mut tags = Tags::new();
        let mut set = |key: &str, value: Option<String>| {
            if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
                tags.insert(key.to_string(), v);
            }
        };
        match self {
            SelectableItem::Artist(a) => set("artist", Some(a.name.clone())),
            SelectableItem::Album(a) => {
                set("artist", Some(a.artist.clone()));
                set("album", Some(a.title.clone()));
                set("year", a.year.clone());
                set("label", a.label.clone());
                set("bit_depth", a.bit_depth.map(|b| b.to_string()));
                set("sampling_rate", a.sampling_rate.map(|r| r.to_string()));
            }
            SelectableItem::Track(t) => {
                set("artist", Some(t.performer.clone()));
                set("tracktitle", Some(t.title.clone()));
                set("album", t.album.clone());
            }
            SelectableItem::Playlist(p) => set("playlist", Some(p.name.clone())),
            SelectableItem::Label(r) => set("label", Some(r.display_title.clone())),
        }
        tags
    }
}

fn quality_badge(hires: bool) -> &'static str {
    if hires {
        "[HI-RES]"
    } else {
        "[LOSSLESS]"
    }
}

/// `H:MM:SS`, or `M:SS` under an hour.
pub fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

impl Selectable for CanonicalResult {
    fn title(&self) -> String {
        self.display_title.clone()
    }

    fn subtitle(&self) -> Option<String> {
        Some(self.canonical_url.clone())
    }
}

impl Selectable for SelectableItem {
    fn title(&self) -> String {
        match self {
            SelectableItem::Artist(a) => a.name.clone(),
            SelectableItem::Album(a) => format!("{} - {}", a.artist, a.title),
            SelectableItem::Track(t) => format!("{} - {}", t.performer, t.title),
            SelectableItem::Playlist(p) => p.name.clone(),
            SelectableItem::Label(r) => r.title(),
        }
    }

    fn subtitle(&self) -> Option<String> {
        match self {
            SelectableItem::Artist(a) => a.albums_count.map(|n| format!("({n} releases)")),
            SelectableItem::Album(a) => {
                let mut parts = Vec::new();
                if let Some(year) = &a.year {
                    parts.push(year.clone());
                }
                if let Some(d) = a.duration_secs {
                    parts.push(format_duration(d));
                }
                parts.push(quality_badge(a.hires).to_string());
                Some(parts.join(" - "))
            }
            SelectableItem::Track(t) => {
                let badge = quality_badge(t.hires);
                Some(match t.duration_secs {
                    Some(d) => format!("{} {badge}", format_duration(d)),
                    None => badge.to_string(),
                })
            }
            SelectableItem::Playlist(p) => p.tracks_count.map(|n| format!("({n} tracks)")),
            SelectableItem::Label(r) => r.subtitle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn album() -> SelectableItem {
        SelectableItem::Album(AlbumItem {
            id: "0825646".into(),
            title: "Migration".into(),
            artist: "Bonobo".into(),
            year: Some("2017".into()),
            label: Some("Ninja Tune".into()),
            duration_secs: Some(3781),
            hires: true,
            bit_depth: Some(24),
            sampling_rate: Some(44.1),
        })
    }

    #[test]
    fn album_rows_and_tags() {
        let item = album();
        assert_eq!(item.title(), "Bonobo - Migration");
        assert_eq!(item.subtitle().as_deref(), Some("2017 - 1:03:01 - [HI-RES]"));
        assert_eq!(item.mode(), SearchMode::Albums);
        let tags = item.naming_tags();
        assert_eq!(tags["label"], "Ninja Tune");
        assert_eq!(tags["sampling_rate"], "44.1");
        assert_eq!(
            item.url(&Canonicalizer::default()),
            "https://play.qobuz.com/album/0825646"
        );
    }

    #[test]
    fn label_item_keeps_canonical_url() {
        let item = SelectableItem::Label(CanonicalResult {
            id: "label:38597".into(),
            kind: EntityKind::Label,
            display_title: "Ninja Tune".into(),
            canonical_url: "https://www.qobuz.com/se-en/label/ninja-tune/38597".into(),
            originating_queries: BTreeSet::new(),
        });
        assert_eq!(item.catalog_id(), "38597");
        assert_eq!(item.mode(), SearchMode::Label);
        assert_eq!(
            item.url(&Canonicalizer::default()),
            "https://www.qobuz.com/se-en/label/ninja-tune/38597"
        );
        assert_eq!(item.naming_tags()["label"], "Ninja Tune");
    }

    #[test]
    fn listing_json_is_tagged_by_type() {
        let json = r#"[
            {"type": "artist", "id": "1", "name": "Bonobo", "albums_count": 42},
            {"type": "playlist", "id": "9", "name": "Late Night"}
        ]"#;
        let items: Vec<SelectableItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].subtitle().as_deref(), Some("(42 releases)"));
        assert_eq!(items[1].kind(), EntityKind::Playlist);
        assert_eq!(items[1].subtitle(), None);
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(3600), "1:00:00");
    }
}
