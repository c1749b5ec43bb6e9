//! Fixed-window request limiting
//!
//! Counters live in process memory, so limits are per instance.

mod limiter;


pub use limiter::{FixedWindowRateLimiter, RateLimitOutcome, RateLimiterTrait};
