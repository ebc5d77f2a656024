use std::time::Duration;

use crate::config::RetryConfig;

/// What went wrong with a query, as far as retrying is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request timed out (connect or whole transfer).
    Timeout,
    /// Endpoint is rate limiting us (429, 503, captcha page).
    Throttled,
    /// Network-level failure (refused, DNS, reset).
    Connection,
    /// Other 5xx status.
    Server(u16),
    /// Retrying will not help (4xx, bad endpoint, aborted).
    Permanent,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Give up on this query.
    GiveUp,
    /// Try again after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff with a cap. Throttling starts one doubling ahead.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub base_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(cfg: &RetryConfig) -> Self {
        let base = if cfg.base_delay_secs.is_finite() && cfg.base_delay_secs > 0.0 {
            Duration::from_secs_f64(cfg.base_delay_secs)
        } else {
            Duration::ZERO
        };
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay: base,
            max_delay: Duration::from_secs(cfg.max_delay_secs),
        }
    }

    /// Policy that never retries; each query gets exactly one attempt.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// `attempt` is 1-based: the attempt that just failed.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::GiveUp;
        }
        let doublings = match kind {
            ErrorKind::Permanent => return RetryDecision::GiveUp,
            ErrorKind::Throttled => attempt,
            ErrorKind::Timeout | ErrorKind::Connection | ErrorKind::Server(_) => {
                attempt.saturating_sub(1)
            }
        };
        let factor = 1u32 << doublings.min(10);
        RetryDecision::RetryAfter(self.base_delay.saturating_mul(factor).min(self.max_delay))
    }
}
