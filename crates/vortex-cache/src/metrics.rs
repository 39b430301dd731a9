//! Cache metrics recording.

use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Registra las metricas de cache.
/// Llamar una vez al inicio, despues de instalar el recorder.
pub fn register_cache_metrics() {
    metrics::describe_counter!("vortex_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!("vortex_cache_misses_total", "Total number of cache misses");
    metrics::describe_counter!(
        "vortex_cache_evictions_total",
        "Total number of cache evictions"
    );
    metrics::describe_counter!(
        "vortex_cache_gray_bypass_total",
        "Queries answered without the cache because of a gray release rule"
    );
    metrics::describe_counter!(
        "vortex_release_events_total",
        "Release events received by the cache"
    );
    metrics::describe_gauge!("vortex_cache_entries", "Current number of entries in cache");
    metrics::describe_gauge!(
        "vortex_cache_index_rows",
        "Current number of watch key index rows"
    );
    metrics::describe_histogram!(
        "vortex_cache_operation_seconds",
        "Time spent on cache operations"
    );
}

/// Recorder de metricas de cache.
/// Usa atomic counters internos para tests y hit rate.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    bypasses: Arc<AtomicU64>,
    release_events: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un cache hit
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("vortex_cache_hits_total").increment(1);
    }

    /// Registra un cache miss
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("vortex_cache_misses_total").increment(1);
    }

    /// Registra una query que no paso por el cache
    pub fn record_bypass(&self) {
        self.bypasses.fetch_add(1, Ordering::Relaxed);
        counter!("vortex_cache_gray_bypass_total").increment(1);
    }

    /// Registra un release event recibido
    pub fn record_release_event(&self) {
        self.release_events.fetch_add(1, Ordering::Relaxed);
        counter!("vortex_release_events_total").increment(1);
    }

    /// Registra evictions
    pub fn record_eviction(&self, reason: &'static str, count: u64) {
        counter!("vortex_cache_evictions_total", "reason" => reason).increment(count);
    }

    /// Actualiza los gauges de entries e index rows
    pub fn update_sizes(&self, entries: u64, index_rows: usize) {
        gauge!("vortex_cache_entries").set(entries as f64);
        gauge!("vortex_cache_index_rows").set(index_rows as f64);
    }

    /// Registra la duracion de una operacion
    pub fn record_operation_duration(&self, operation: &'static str, duration: Duration) {
        histogram!("vortex_cache_operation_seconds", "operation" => operation)
            .record(duration.as_secs_f64());
    }

    /// Calcula hit rate (para logging/debugging)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn bypasses(&self) -> u64 {
        self.bypasses.load(Ordering::Relaxed)
    }

    pub fn release_events(&self) -> u64 {
        self.release_events.load(Ordering::Relaxed)
    }
}
