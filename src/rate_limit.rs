//! Per-client request rate limiting.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of the sliding window in milliseconds.
pub const WINDOW_MS: u64 = 60_000;

/// Rate limiter using sliding window algorithm.
#[derive(Debug, Default)]
pub struct RateLimiter {
    /// Request timestamps per client key.
    windows: DashMap<String, VecDeque<u64>>,
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request may proceed.
    pub allowed: bool,
    /// Requests left in the current window after this one.
    pub remaining: u32,
    /// Seconds until the oldest request leaves the window.
    pub retry_after: u64,
}

impl RateLimiter {
    /// Create a new rate limiter.
    pub fn new() -> Self {
        Self {
            windows: DashMap::new(),
        }
    }

    /// Checks the window for `key` and records the request if it is allowed.
    pub fn check_and_record(&self, key: &str, limit: u32) -> RateLimitDecision {
        self.check_and_record_at(key, limit, now_ms())
    }

    fn check_and_record_at(&self, key: &str, limit: u32, now: u64) -> RateLimitDecision {
        let window_start = now.saturating_sub(WINDOW_MS);

        let mut entry = self.windows.entry(key.to_string()).or_default();
        let window = entry.value_mut();

        // Remove old entries outside the window
        while let Some(&front) = window.front() {
            if front < window_start {
                window.pop_front();
            } else {
                break;
            }
        }

        let allowed = window.len() < limit as usize;
        if allowed {
            window.push_back(now);
        }

        let retry_after = window
            .front()
            .map(|&oldest| (oldest + WINDOW_MS).saturating_sub(now).div_ceil(1000))
            .unwrap_or(0);

        RateLimitDecision {
            allowed,
            remaining: (limit as usize).saturating_sub(window.len()) as u32,
            retry_after,
        }
    }

    /// Drops windows with no requests inside the current window.
    pub fn prune(&self) {
        let window_start = now_ms().saturating_sub(WINDOW_MS);
        self.windows
            .retain(|_, window| window.back().is_some_and(|&last| last >= window_start));
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter() {
        let limiter = RateLimiter::new();

        // Should allow up to limit requests
        for i in 0..10 {
            let decision = limiter.check_and_record("client", 10);
            assert!(decision.allowed);
            assert_eq!(decision.remaining, 9 - i);
        }

        // 11th request should be denied
        let denied = limiter.check_and_record("client", 10);
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        assert!(denied.retry_after > 0 && denied.retry_after <= 60);
    }

    #[test]
    fn test_rate_limiter_different_keys() {
        let limiter = RateLimiter::new();

        for _ in 0..5 {
            assert!(limiter.check_and_record("key1", 5).allowed);
        }
        assert!(!limiter.check_and_record("key1", 5).allowed);

        // key2 should still have capacity
        assert!(limiter.check_and_record("key2", 5).allowed);
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn test_window_slides() {
        let limiter = RateLimiter::new();
        let start = 1_000_000;

        assert!(limiter.check_and_record_at("client", 2, start).allowed);
        assert!(limiter.check_and_record_at("client", 2, start + 10).allowed);
        assert!(!limiter.check_and_record_at("client", 2, start + 20).allowed);

        // First request has left the window
        let later = limiter.check_and_record_at("client", 2, start + WINDOW_MS + 1);
        assert!(later.allowed);
        assert_eq!(later.remaining, 0);
    }

    #[test]
    fn test_retry_after_counts_to_oldest_expiry() {
        let limiter = RateLimiter::new();
        let start = 5_000_000;

        assert!(limiter.check_and_record_at("client", 1, start).allowed);
        let denied = limiter.check_and_record_at("client", 1, start + 30_000);
        assert!(!denied.allowed);
        assert_eq!(denied.retry_after, 30);
    }

    #[test]
    fn test_prune_drops_stale_windows() {
        let limiter = RateLimiter::new();
        limiter.check_and_record_at("stale", 5, 1);
        limiter.check_and_record("fresh", 5);

        limiter.prune();
        assert_eq!(limiter.tracked_clients(), 1);
    }
}
