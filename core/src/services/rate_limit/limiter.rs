//! Rate limiting trait and the in-memory fixed-window implementation

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use ns_shared::WindowLimit;

/// Result of counting one request against a key
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitOutcome {
    pub rate_limited: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
    checked_at: DateTime<Utc>,
}

impl RateLimitOutcome {
    /// Outcome for a limiter that never limits
    pub fn unlimited(now: DateTime<Utc>) -> Self {
        Self {
            rate_limited: false,
            limit: u32::MAX,
            remaining: u32::MAX,
            reset_at: now,
            checked_at: now,
        }
    }

    /// Whole seconds until the window resets, at least 1 while limited
    pub fn retry_after_seconds(&self) -> u64 {
        if !self.rate_limited {
            return 0;
        }
        let millis = (self.reset_at - self.checked_at).num_milliseconds().max(0) as u64;
        ((millis + 999) / 1000).max(1)
    }
}

/// Request limiting keyed by an identifier such as a client IP
pub trait RateLimiterTrait: Send + Sync {
    /// Count a request for `key` and report whether it is over the limit
    fn check(&self, key: &str) -> RateLimitOutcome;

    /// Forget the counter for `key`
    fn reset(&self, key: &str);

    /// Drop counters whose window has ended
    fn purge(&self) -> usize;
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// In-memory fixed-window counter
pub struct FixedWindowRateLimiter {
    max_requests: u32,
    window: Duration,
    enabled: bool,
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowRateLimiter {
    pub fn new(max_requests: u32, window: std::time::Duration) -> Self {
        Self {
            max_requests,
            window: Duration::from_std(window).unwrap_or_else(|_| Duration::seconds(60)),
            enabled: true,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_limit(limit: &WindowLimit, enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::new(limit.max_requests, limit.window())
        }
    }

    /// A limiter that lets everything through
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(0, std::time::Duration::from_secs(60))
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn limit(&self) -> u32 {
        self.max_requests
    }

    /// Count a request at `now`
    pub fn check_at(&self, key: &str, now: DateTime<Utc>) -> RateLimitOutcome {
        if !self.enabled {
            return RateLimitOutcome::unlimited(now);
        }

        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let window = windows
            .entry(key.to_string())
            .and_modify(|w| {
                if now >= w.reset_at {
                    *w = Window {
                        count: 0,
                        reset_at: now + self.window,
                    };
                }
            })
            .or_insert(Window {
                count: 0,
                reset_at: now + self.window,
            });
        window.count = window.count.saturating_add(1);

        let rate_limited = window.count > self.max_requests;
        if rate_limited {
            tracing::debug!(key, count = window.count, limit = self.max_requests, "rate limited");
        }

        RateLimitOutcome {
            rate_limited,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(window.count),
            reset_at: window.reset_at,
            checked_at: now,
        }
    }

    /// Drop windows that have already reset; returns how many were removed
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let before = windows.len();
        windows.retain(|_, w| w.reset_at > now);
        before - windows.len()
    }

    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl RateLimiterTrait for FixedWindowRateLimiter {
    fn check(&self, key: &str) -> RateLimitOutcome {
        self.check_at(key, Utc::now())
    }

    fn reset(&self, key: &str) {
        self.windows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }

    fn purge(&self) -> usize {
        self.purge_expired(Utc::now())
    }
}
