//! Download plan: the selection plus resolved names, handed to the downloader.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::canonical::{Canonicalizer, EntityKind};
use crate::naming::{NamingResolver, SearchMode};
use crate::quality::Quality;
use crate::select::{Selectable, SelectableItem, Selection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub id: String,
    pub kind: EntityKind,
    pub url: String,
    pub title: String,
    pub mode: SearchMode,
    /// `root/[top folder/]sub folder`.
    pub folder: PathBuf,
    /// Track file name template with job tags applied.
    pub track_pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadPlan {
    pub quality: Quality,
    pub root: PathBuf,
    pub entries: Vec<PlanEntry>,
}

/// What the downloader receives: a queue, or a marker that the user aborted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PlanOutcome {
    Queued(DownloadPlan),
    Cancelled,
}

impl PlanOutcome {
    /// `default_quality` applies when the selector did not ask for one.
    pub fn from_selection(
        selection: Selection<SelectableItem>,
        resolver: &NamingResolver,
        canonicalizer: &Canonicalizer,
        root: &Path,
        default_quality: Quality,
    ) -> Self {
        match selection {
            Selection::Confirmed { items, quality } => PlanOutcome::Queued(build_plan(
                &items,
                resolver,
                canonicalizer,
                root,
                quality.unwrap_or(default_quality),
            )),
            Selection::Cancelled => PlanOutcome::Cancelled,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn build_plan(
    items: &[SelectableItem],
    resolver: &NamingResolver,
    canonicalizer: &Canonicalizer,
    root: &Path,
    quality: Quality,
) -> DownloadPlan {
    let entries = items
        .iter()
        .map(|item| {
            let mode = item.mode();
            let name = resolver.resolve(mode, &item.naming_tags());
            PlanEntry {
                id: item.catalog_id().to_string(),
                kind: item.kind(),
                url: item.url(canonicalizer),
                title: item.title(),
                mode,
                folder: name.folder_path(root),
                track_pattern: name.track_pattern.to_string(),
            }
        })
        .collect::<Vec<_>>();
    tracing::debug!(entries = entries.len(), quality = quality.id(), "download plan built");
    DownloadPlan {
        quality,
        root: root.to_path_buf(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::CanonicalResult;
    use crate::select::{PlaylistItem, TrackItem};
    use std::collections::BTreeSet;

    fn label() -> SelectableItem {
        SelectableItem::Label(CanonicalResult {
            id: "label:38597".into(),
            kind: EntityKind::Label,
            display_title: "Ninja Tune".into(),
            canonical_url: "https://www.qobuz.com/se-en/label/ninja-tune/38597".into(),
            originating_queries: BTreeSet::from(["q".to_string()]),
        })
    }

    #[test]
    fn label_entry_lands_under_label_folder() {
        let plan = build_plan(
            &[label()],
            &NamingResolver::default(),
            &Canonicalizer::default(),
            Path::new("/music"),
            Quality::HiRes96,
        );
        let entry = &plan.entries[0];
        assert_eq!(entry.mode, SearchMode::Label);
        assert_eq!(entry.id, "38597");
        assert!(entry.folder.starts_with("/music/Label - Ninja Tune"));
        assert_eq!(entry.track_pattern, "{tracknumber}. {artist} - {tracktitle}");
    }

    #[test]
    fn track_pattern_in_plan_is_path_safe() {
        let item = SelectableItem::Track(TrackItem {
            id: "6001".into(),
            title: "T.N.T: Live?".into(),
            performer: "AC/DC".into(),
            album: Some("High <Voltage>".into()),
            duration_secs: Some(214),
            hires: false,
        });
        let plan = build_plan(
            &[item],
            &NamingResolver::default(),
            &Canonicalizer::default(),
            Path::new("/music"),
            Quality::Cd,
        );
        let pattern = &plan.entries[0].track_pattern;
        assert!(pattern.contains("AC_DC"), "{pattern}");
        assert!(
            !pattern.contains(['/', '\\', ':', '*', '?', '"', '<', '>', '|']),
            "{pattern}"
        );
    }

    #[test]
    fn playlist_entry_uses_app_url() {
        let item = SelectableItem::Playlist(PlaylistItem {
            id: "991".into(),
            name: "Late Night".into(),
            tracks_count: Some(12),
        });
        let plan = build_plan(
            &[item],
            &NamingResolver::default(),
            &Canonicalizer::default(),
            Path::new("out"),
            Quality::Cd,
        );
        assert_eq!(plan.entries[0].url, "https://play.qobuz.com/playlist/991");
        assert!(plan.entries[0].folder.starts_with("out/Late Night"));
    }

    #[test]
    fn outcome_json_carries_status() {
        let cancelled = PlanOutcome::from_selection(
            Selection::Cancelled,
            &NamingResolver::default(),
            &Canonicalizer::default(),
            Path::new("out"),
            Quality::Cd,
        );
        let json: serde_json::Value = serde_json::from_str(&cancelled.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["status"], "cancelled");

        let queued = PlanOutcome::from_selection(
            Selection::Confirmed {
                items: vec![],
                quality: None,
            },
            &NamingResolver::default(),
            &Canonicalizer::default(),
            Path::new("out"),
            Quality::Mp3,
        );
        let json: serde_json::Value = serde_json::from_str(&queued.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["status"], "queued");
        assert_eq!(json["quality"], 5);
        assert_eq!(json["entries"].as_array().map(Vec::len), Some(0));
    }
}
