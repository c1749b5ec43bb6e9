//! Key-value store repository module.

mod r#trait;
pub use r#trait::KvStore;

mod mock;
pub use mock::MockKvStore;
