//! Mock collaborators.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;
use vortex_cache::{ConfigQueryEngine, GrayReleaseRules};
use vortex_core::{
    ClientIdentity, ConfigCoordinate, ReleasedConfig, Result, VortexError, WatchKeys,
};

/// Pausa una query en curso hasta que el test la libere.
#[derive(Clone, Default)]
pub struct Gate {
    pub started: Arc<Notify>,
    pub proceed: Arc<Notify>,
}

/// Engine que cuenta llamadas y devuelve releases configurables.
///
/// Cada namespace sirve `key=<value>` (por defecto `v1`) y depende de las
/// watch keys de su coordenada, salvo que el test las reemplace.
#[derive(Default)]
pub struct MockEngine {
    calls: AtomicUsize,
    failing: AtomicBool,
    values: Mutex<HashMap<String, String>>,
    watch_keys: Mutex<HashMap<String, BTreeSet<String>>>,
    gate: Mutex<Option<Gate>>,
    delay: Mutex<Option<Duration>>,
}

impl MockEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_value(&self, namespace: &str, value: &str) {
        self.values
            .lock()
            .insert(namespace.to_string(), value.to_string());
    }

    pub fn set_watch_keys<const N: usize>(&self, namespace: &str, watch_keys: [&str; N]) {
        self.watch_keys.lock().insert(
            namespace.to_string(),
            watch_keys.iter().map(|k| k.to_string()).collect(),
        );
    }

    /// La proxima query se detiene hasta `gate.proceed`.
    pub fn pause_next(&self) -> Gate {
        let gate = Gate::default();
        *self.gate.lock() = Some(gate.clone());
        gate
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }
}

#[async_trait]
impl ConfigQueryEngine for MockEngine {
    async fn query_config(
        &self,
        coordinate: &ConfigCoordinate,
        _client: &ClientIdentity,
    ) -> Result<ReleasedConfig> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            gate.started.notify_one();
            gate.proceed.notified().await;
        }

        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(VortexError::unavailable("mock-release-db", "connection refused"));
        }

        let namespace = coordinate.namespace();
        let value = self
            .values
            .lock()
            .get(namespace)
            .cloned()
            .unwrap_or_else(|| "v1".to_string());
        let watch_keys = self
            .watch_keys
            .lock()
            .get(namespace)
            .cloned()
            .unwrap_or_else(|| WatchKeys::for_coordinate(coordinate));

        Ok(ReleasedConfig::new(
            coordinate.app_id(),
            coordinate.cluster(),
            namespace,
            "20260101-release",
        )
        .with_entry("key", value)
        .with_watch_keys(watch_keys))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Gray rules that target a fixed set of client IPs.
#[derive(Default)]
pub struct TargetedGrayRules {
    ips: Mutex<HashSet<String>>,
}

impl TargetedGrayRules {
    pub fn targeting(ip: &str) -> Arc<Self> {
        let rules = Self::default();
        rules.ips.lock().insert(ip.to_string());
        Arc::new(rules)
    }
}

impl GrayReleaseRules for TargetedGrayRules {
    fn has_override(
        &self,
        _app_id: &str,
        client_ip: Option<&str>,
        _client_label: Option<&str>,
        _namespace: &str,
    ) -> bool {
        client_ip.is_some_and(|ip| self.ips.lock().contains(ip))
    }
}
