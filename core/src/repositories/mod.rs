//! Storage interfaces used by the services.

pub mod kv;

pub use kv::{KvStore, MockKvStore};
