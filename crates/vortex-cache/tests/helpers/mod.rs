//! Test helpers para vortex-cache.

#![allow(dead_code, unused_imports)]

pub mod engine;

pub use engine::{Gate, MockEngine, TargetedGrayRules};

use std::sync::Arc;

use vortex_cache::{CacheSettings, ConfigFileCache, NoGrayReleaseRules};
use vortex_core::{ClientIdentity, ConfigCoordinate};

/// Cache sin gray rules sobre el engine dado.
pub fn cache_with(engine: Arc<MockEngine>, settings: CacheSettings) -> ConfigFileCache {
    ConfigFileCache::new(engine, Arc::new(NoGrayReleaseRules), settings)
}

pub fn coordinate(app_id: &str, cluster: &str, namespace: &str) -> ConfigCoordinate {
    ConfigCoordinate::new(app_id, cluster, namespace).unwrap()
}

pub fn anonymous() -> ClientIdentity {
    ClientIdentity::anonymous()
}

/// Instala un subscriber de tracing para ver los logs con `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
