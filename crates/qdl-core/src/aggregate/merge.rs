//! Deterministic merge of canonicalized hits into a result set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::canonical::{display_title, Canonicalizer, EntityKind};
use crate::search::SearchHit;

/// One deduplicated catalog entity discovered during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalResult {
    /// Region-neutral identity, unique within a result set.
    pub id: String,
    pub kind: EntityKind,
    pub display_title: String,
    pub canonical_url: String,
    /// Every query that surfaced this entity.
    #[serde(default)]
    pub originating_queries: BTreeSet<String>,
}

impl CanonicalResult {
    /// Catalog id without the kind prefix.
    pub fn catalog_id(&self) -> &str {
        self.id.split_once(':').map(|(_, id)| id).unwrap_or(&self.id)
    }
}

/// What happened to a single hit during merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Merged,
    Rejected,
}

/// Insertion-ordered result set keyed by canonical id. Single writer.
#[derive(Debug, Default)]
pub struct ResultSet {
    results: Vec<CanonicalResult>,
    index: HashMap<String, usize>,
    accept: Option<EntityKind>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result set that rejects hits of any other kind.
    pub fn accepting(kind: EntityKind) -> Self {
        Self {
            accept: Some(kind),
            ..Self::default()
        }
    }

    /// Canonicalizes `hit` and folds it in. First-seen title and URL are kept;
    /// later sightings only add their query to the provenance.
    pub fn merge(&mut self, hit: SearchHit, canonicalizer: &Canonicalizer) -> MergeOutcome {
        let Some(canonical) = canonicalizer.canonicalize(&hit.raw_url) else {
            return MergeOutcome::Rejected;
        };
        if self.accept.is_some_and(|kind| kind != canonical.kind) {
            tracing::debug!(url = %hit.raw_url, kind = %canonical.kind, "rejected: unwanted kind");
            return MergeOutcome::Rejected;
        }

        if let Some(&pos) = self.index.get(&canonical.id) {
            self.results[pos].originating_queries.insert(hit.source_query);
            return MergeOutcome::Merged;
        }

        let result = CanonicalResult {
            display_title: display_title(&canonical, &hit.title),
            id: canonical.id,
            kind: canonical.kind,
            canonical_url: canonical.url,
            originating_queries: BTreeSet::from([hit.source_query]),
        };
        self.index.insert(result.id.clone(), self.results.len());
        self.results.push(result);
        MergeOutcome::Inserted
    }

    /// Folds an already canonical result in (used when combining runs).
    pub fn insert_result(&mut self, result: CanonicalResult) -> MergeOutcome {
        if let Some(&pos) = self.index.get(&result.id) {
            self.results[pos]
                .originating_queries
                .extend(result.originating_queries);
            return MergeOutcome::Merged;
        }
        self.index.insert(result.id.clone(), self.results.len());
        self.results.push(result);
        MergeOutcome::Inserted
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CanonicalResult> {
        self.index.get(id).map(|&pos| &self.results[pos])
    }

    pub fn into_results(self) -> Vec<CanonicalResult> {
        self.results
    }
}
