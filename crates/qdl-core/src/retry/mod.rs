//! Retry and backoff policy for search queries.
//!
//! Search endpoints rate-limit aggressively when several query variants go
//! out back to back, so throttling is classified separately and backs off
//! harder than plain transport failures.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
