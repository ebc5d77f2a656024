//! Cross-query result aggregation.
//!
//! Fetches run concurrently on up to `max_workers` blocking tasks; merging
//! happens afterwards on the calling task, strictly in query order, so the
//! output only depends on the per-query hit lists.

mod merge;
mod queries;

pub use merge::{CanonicalResult, MergeOutcome, ResultSet};
pub use queries::{fallback_query, label_query_variants, normalize_name};

use std::sync::Arc;
use tokio::task::JoinSet;

use crate::canonical::{Canonicalizer, EntityKind};
use crate::config::QdlConfig;
use crate::control::CancelToken;
use crate::retry::{run_with_retry, RetryPolicy};
use crate::search::{RawHit, SearchEngine, SearchError, SearchHit};

/// Knobs for one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Hits kept per query (extra hits returned by the engine are ignored).
    pub results_per_query: usize,
    /// Queries fetched at the same time.
    pub max_workers: usize,
    pub retry: RetryPolicy,
    /// When set, canonical results of other kinds are dropped.
    pub accept: Option<EntityKind>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            results_per_query: 5,
            max_workers: 3,
            retry: RetryPolicy::default(),
            accept: None,
        }
    }
}

impl AggregateOptions {
    pub fn from_config(cfg: &QdlConfig) -> Self {
        Self {
            results_per_query: cfg.search.results_per_query,
            max_workers: cfg.search.max_workers,
            retry: cfg
                .retry
                .as_ref()
                .map(RetryPolicy::from_config)
                .unwrap_or_default(),
            accept: None,
        }
    }
}

/// A query whose hits are missing from the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedQuery {
    pub query: String,
    pub reason: String,
}

/// Outcome of an aggregation run. Never an error: failed queries are listed
/// in `skipped` and an all-failed run simply has no results.
#[derive(Debug, Default)]
pub struct AggregateReport {
    /// Deduplicated results in first-seen order across the query sequence.
    pub results: Vec<CanonicalResult>,
    pub skipped: Vec<SkippedQuery>,
    /// Hits dropped by the canonicalizer or the kind filter.
    pub rejected: usize,
    /// True when the run was cancelled before every query finished.
    pub aborted: bool,
}

impl AggregateReport {
    fn absorb(&mut self, other: AggregateReport) {
        let mut set = ResultSet::new();
        for r in self.results.drain(..).chain(other.results) {
            set.insert_result(r);
        }
        self.results = set.into_results();
        self.skipped.extend(other.skipped);
        self.rejected += other.rejected;
        self.aborted |= other.aborted;
    }
}

type QueryOutcome = Result<Vec<RawHit>, SearchError>;

/// Runs every query in `queries` (no early exit), canonicalizes every hit and
/// merges them into one deduplicated, insertion-ordered list.
pub async fn aggregate<E>(
    engine: Arc<E>,
    canonicalizer: &Canonicalizer,
    queries: &[String],
    options: &AggregateOptions,
    cancel: &CancelToken,
) -> AggregateReport
where
    E: SearchEngine + ?Sized + 'static,
{
    let (outcomes, aborted) = fetch_all(engine, queries, options, cancel).await;

    let mut set = match options.accept {
        Some(kind) => ResultSet::accepting(kind),
        None => ResultSet::new(),
    };
    let mut report = AggregateReport {
        aborted,
        ..AggregateReport::default()
    };

    for (query, outcome) in queries.iter().zip(outcomes) {
        match outcome {
            Some(Ok(hits)) => {
                for raw in hits.into_iter().take(options.results_per_query) {
                    if set.merge(SearchHit::from_raw(raw, query), canonicalizer)
                        == MergeOutcome::Rejected
                    {
                        report.rejected += 1;
                    }
                }
            }
            Some(Err(err)) => {
                tracing::warn!(query = %query, "skipping query: {err}");
                report.skipped.push(SkippedQuery {
                    query: query.clone(),
                    reason: err.to_string(),
                });
            }
            None => {
                let reason = if aborted { "aborted" } else { "search worker failed" };
                tracing::warn!(query = %query, "skipping query: {reason}");
                report.skipped.push(SkippedQuery {
                    query: query.clone(),
                    reason: reason.to_string(),
                });
            }
        }
    }

    report.results = set.into_results();
    tracing::info!(
        queries = queries.len(),
        results = report.results.len(),
        skipped = report.skipped.len(),
        rejected = report.rejected,
        aborted = report.aborted,
        "aggregation finished"
    );
    report
}

/// Fetch phase: bounded fan-out, outcomes slotted by query index.
async fn fetch_all<E>(
    engine: Arc<E>,
    queries: &[String],
    options: &AggregateOptions,
    cancel: &CancelToken,
) -> (Vec<Option<QueryOutcome>>, bool)
where
    E: SearchEngine + ?Sized + 'static,
{
    let mut outcomes: Vec<Option<QueryOutcome>> = queries.iter().map(|_| None).collect();
    let max_workers = options.max_workers.max(1);
    let mut join_set: JoinSet<(usize, QueryOutcome)> = JoinSet::new();
    let mut next = 0usize;

    loop {
        while join_set.len() < max_workers && next < queries.len() && !cancel.is_cancelled() {
            let idx = next;
            next += 1;
            let query = queries[idx].clone();
            let engine = Arc::clone(&engine);
            let policy = options.retry;
            let per_query = options.results_per_query;
            let token = cancel.clone();
            tracing::info!(query = %query, "searching");
            join_set.spawn_blocking(move || {
                let outcome = run_with_retry(&policy, &token, || engine.search(&query, per_query));
                (idx, outcome)
            });
        }

        if cancel.is_cancelled() {
            drain_finished(&mut join_set, &mut outcomes);
            return (outcomes, true);
        }
        if join_set.is_empty() {
            return (outcomes, false);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                drain_finished(&mut join_set, &mut outcomes);
                return (outcomes, true);
            }
            joined = join_set.join_next() => match joined {
                Some(joined) => record(joined, &mut outcomes),
                None => return (outcomes, false),
            },
        }
    }
}

type Joined = Result<(usize, QueryOutcome), tokio::task::JoinError>;

fn record(joined: Joined, outcomes: &mut [Option<QueryOutcome>]) {
    match joined {
        Ok((idx, outcome)) => outcomes[idx] = Some(outcome),
        Err(e) => tracing::error!("search worker failed: {e}"),
    }
}

/// Keeps outcomes that completed but were not joined yet; tasks still
/// running are left behind.
fn drain_finished(
    join_set: &mut JoinSet<(usize, QueryOutcome)>,
    outcomes: &mut [Option<QueryOutcome>],
) {
    while let Some(joined) = join_set.try_join_next() {
        record(joined, outcomes);
    }
    if !join_set.is_empty() {
        tracing::debug!(running = join_set.len(), "abandoning in-flight searches");
    }
}

/// Label discovery: all label query variants restricted to label pages, then
/// one broad fallback query (any entity kind) if that found nothing.
pub async fn discover_labels<E>(
    engine: Arc<E>,
    canonicalizer: &Canonicalizer,
    name: &str,
    options: &AggregateOptions,
    cancel: &CancelToken,
) -> AggregateReport
where
    E: SearchEngine + ?Sized + 'static,
{
    let domain = canonicalizer.domain();
    let queries = label_query_variants(domain, name);
    let label_opts = AggregateOptions {
        accept: Some(EntityKind::Label),
        ..options.clone()
    };
    let mut report = aggregate(Arc::clone(&engine), canonicalizer, &queries, &label_opts, cancel).await;

    if report.results.is_empty() && !report.aborted {
        tracing::info!(name, "no label pages found; trying fallback search");
        let fallback = vec![fallback_query(domain, name)];
        let any_opts = AggregateOptions {
            accept: None,
            ..options.clone()
        };
        let extra = aggregate(engine, canonicalizer, &fallback, &any_opts, cancel).await;
        report.absorb(extra);
    }
    report
}
