//! Retry loop: run a query until success, give-up, or cancellation.

use std::time::{Duration, Instant};

use super::classify;
use super::policy::{RetryDecision, RetryPolicy};
use crate::control::CancelToken;
use crate::search::SearchError;

const CANCEL_POLL: Duration = Duration::from_millis(50);

/// Runs `f` until it succeeds or the policy gives up. Sleeps between attempts
/// (blocking; call from `spawn_blocking`) and returns `SearchError::Aborted`
/// as soon as `cancel` fires.
pub fn run_with_retry<T, F>(
    policy: &RetryPolicy,
    cancel: &CancelToken,
    mut f: F,
) -> Result<T, SearchError>
where
    F: FnMut() -> Result<T, SearchError>,
{
    let mut attempt = 1u32;
    loop {
        if cancel.is_cancelled() {
            return Err(SearchError::Aborted);
        }
        let err = match f() {
            Ok(v) => return Ok(v),
            Err(e) => e,
        };
        let kind = classify::classify(&err);
        match policy.decide(attempt, kind) {
            RetryDecision::GiveUp => return Err(err),
            RetryDecision::RetryAfter(d) => {
                tracing::debug!(attempt, ?kind, delay_ms = d.as_millis() as u64, "retrying query: {err}");
                sleep_unless_cancelled(d, cancel)?;
                attempt += 1;
            }
        }
    }
}

fn sleep_unless_cancelled(total: Duration, cancel: &CancelToken) -> Result<(), SearchError> {
    let deadline = Instant::now() + total;
    loop {
        if cancel.is_cancelled() {
            return Err(SearchError::Aborted);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(());
        }
        std::thread::sleep((deadline - now).min(CANCEL_POLL));
    }
}
