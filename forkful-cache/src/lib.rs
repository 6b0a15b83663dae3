//! TTL cache for Forkful.
//!
//! Process-local key/value store with per-entry expiration, lazy eviction on
//! read, an explicit sweep task, and the key grammar shared by every caller.

mod cache;
mod keys;
mod sweeper;

pub use cache::{CacheConfig, CacheStats, TtlCache};
pub use keys::CacheKeys;
pub use sweeper::SweeperHandle;
