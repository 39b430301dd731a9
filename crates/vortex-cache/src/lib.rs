//! # Vortex Cache
//!
//! Watch-key indexed response cache for Vortex Config.
//!
//! Serving a config file means querying the latest release, merging it and
//! rendering it. This crate caches the rendered response and evicts it
//! precisely when one of the namespaces it was built from gets a new
//! release.
//!
//! ## Features
//!
//! - Moka-backed response cache bounded by weight and TTL
//! - Bidirectional watch key index over concurrent multimaps
//! - Release message dispatcher feeding invalidations to listeners
//! - Gray release bypass: targeted clients never touch the shared cache
//! - Layered settings (file + environment) and `metrics` instrumentation
//!
//! ## Example
//!
//! ```ignore
//! use vortex_cache::{
//!     CacheSettings, CacheSweeper, ConfigFileCache, NoGrayReleaseRules, ReleaseEnvelope,
//!     ReleaseMessageDispatcher,
//! };
//!
//! let settings = CacheSettings::load(Some(Path::new("vortex-cache.toml")))?;
//! let cache = ConfigFileCache::new(engine, Arc::new(NoGrayReleaseRules), settings);
//! let _sweeper = CacheSweeper::from_settings(cache.clone()).start();
//!
//! let (tx, rx) = tokio::sync::mpsc::channel(1024);
//! let _dispatcher = ReleaseMessageDispatcher::new(vec![Arc::new(cache.clone())]).spawn(rx);
//!
//! let response = cache
//!     .query(&coordinate, &ClientIdentity::anonymous(), OutputFormat::Json)
//!     .await?;
//!
//! tx.send(ReleaseEnvelope::release(42, "myapp+default+application")).await?;
//! ```

pub mod cache;
pub mod error;
pub mod metrics;
pub mod release;
pub mod settings;
pub mod source;

// Re-exports
pub use cache::{
    CacheKey, CacheSweeper, ConcurrentMultimap, ConfigFileCache, KeyCase, SweeperHandle,
    WatchKeyIndex,
};
pub use error::CacheError;
pub use metrics::{CacheMetrics, register_cache_metrics};
pub use release::{
    DispatcherHandle, RELEASE_TOPIC, ReleaseEnvelope, ReleaseMessage, ReleaseMessageDispatcher,
    ReleaseMessageListener,
};
pub use settings::CacheSettings;
pub use source::{ConfigQueryEngine, GrayReleaseRules, NoGrayReleaseRules};

// Re-export vortex_core for consumers
pub use vortex_core;
