//! Process-local email analytics
//!
//! Delivery events come from two places: the contact service records a
//! `Sent` event per delivered email and the provider webhook records the
//! rest. The log is bounded and lost on restart.

mod service;


pub use service::{EmailAnalytics, DEFAULT_CAPACITY};
