//! Retry schedule for the generation API call.
//!
//! The schedule lives in a plain value object so the delay arithmetic can be
//! unit-tested without a clock and the request loop can be driven in tests
//! with a zero-delay policy against a mock server.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry schedule: how many attempts, and how long to wait between them.
///
/// The wait after failed attempt *n* is `base_delay * 2^n`, so with the
/// default 1-second base the gaps between the five attempts are
/// 2 s, 4 s, 8 s, and 16 s. No wait follows the final attempt; exhaustion is
/// reported immediately.
///
/// No jitter is applied. Retries are strictly sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Minimum 1.
    pub max_attempts: u32,
    /// Base delay doubled per failed attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy that retries without waiting. For tests.
    pub fn no_backoff(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::ZERO,
        }
    }

    /// Wait to insert after `failed_attempts` attempts have failed (1-based).
    pub fn delay_after(&self, failed_attempts: u32) -> Duration {
        // Saturate rather than overflow for absurd attempt counts.
        let factor = 2u32.checked_pow(failed_attempts).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_doubles_from_two_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        let gaps: Vec<u64> = (1..policy.max_attempts)
            .map(|n| policy.delay_after(n).as_secs())
            .collect();
        assert_eq!(gaps, vec![2, 4, 8, 16]);
    }

    #[test]
    fn no_backoff_has_zero_delays() {
        let policy = RetryPolicy::no_backoff(5);
        for n in 1..5 {
            assert_eq!(policy.delay_after(n), Duration::ZERO);
        }
    }

    #[test]
    fn no_backoff_enforces_at_least_one_attempt() {
        assert_eq!(RetryPolicy::no_backoff(0).max_attempts, 1);
    }

    #[test]
    fn huge_attempt_count_saturates() {
        let policy = RetryPolicy::default();
        // Must not panic or wrap to a short delay.
        assert!(policy.delay_after(64) >= policy.delay_after(10));
    }
}
