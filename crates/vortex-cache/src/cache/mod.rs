//! Cache module for the config file service.
//!
//! Rendered responses live in a Moka cache bounded by weight and TTL. A
//! [`WatchKeyIndex`] records which watch keys every entry depends on, so a
//! release event evicts exactly the affected entries.

pub mod controller;
pub mod index;
pub mod keys;
pub mod multimap;
pub mod sweeper;

// Re-exports
pub use controller::ConfigFileCache;
pub use index::WatchKeyIndex;
pub use keys::CacheKey;
pub use multimap::{ConcurrentMultimap, KeyCase};
pub use sweeper::{CacheSweeper, SweeperHandle};
