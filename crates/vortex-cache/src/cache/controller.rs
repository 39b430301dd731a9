//! Rendered config file cache using Moka, invalidated by release events.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use moka::future::Cache;
use moka::notification::RemovalCause;
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use vortex_core::{
    ClientIdentity, ConfigCoordinate, OutputFormat, RenderedResponse, VortexError, render,
};

use super::index::WatchKeyIndex;
use super::keys::CacheKey;
use super::multimap::{KeyCase, normalize_key};
use crate::error::CacheError;
use crate::metrics::CacheMetrics;
use crate::release::{RELEASE_TOPIC, ReleaseMessage, ReleaseMessageListener};
use crate::settings::CacheSettings;
use crate::source::{ConfigQueryEngine, GrayReleaseRules};

/// Cache de respuestas renderizadas, indexado por watch key.
///
/// En un cache miss consulta el query engine, renderiza la respuesta,
/// registra sus watch keys en el [`WatchKeyIndex`] y la guarda. Un release
/// event para una watch key invalida exactamente las entries que dependen
/// de ella.
///
/// Clonar es barato: todos los clones comparten el mismo cache e index.
///
/// # Examples
///
/// ```ignore
/// use vortex_cache::{CacheSettings, ConfigFileCache, NoGrayReleaseRules};
/// use vortex_core::{ClientIdentity, ConfigCoordinate, OutputFormat};
///
/// let cache = ConfigFileCache::new(engine, Arc::new(NoGrayReleaseRules), CacheSettings::default());
/// let coordinate = ConfigCoordinate::new("myapp", "default", "application")?;
///
/// let response = cache
///     .query(&coordinate, &ClientIdentity::anonymous(), OutputFormat::Properties)
///     .await?;
///
/// // Publicado un nuevo release de myapp+default+application
/// cache.on_release_event("myapp+default+application").await;
/// ```
#[derive(Clone)]
pub struct ConfigFileCache {
    responses: Cache<String, Arc<RenderedResponse>>,
    index: Arc<WatchKeyIndex>,
    engine: Arc<dyn ConfigQueryEngine>,
    gray_rules: Arc<dyn GrayReleaseRules>,
    settings: Arc<CacheSettings>,
    /// Incremented by every release event.
    release_epoch: Arc<AtomicU64>,
    /// Folded watch key -> epoch of its latest release event.
    recent_releases: moka::sync::Cache<String, u64>,
    /// Keys evicted by TTL or capacity whose index rows are still present.
    expired_keys: Arc<Mutex<Vec<String>>>,
    metrics: CacheMetrics,
}

impl ConfigFileCache {
    /// Crea un nuevo cache con la configuracion dada.
    ///
    /// Las filas del index de entries expiradas o desalojadas se limpian en
    /// el siguiente cache miss o en [`run_pending_tasks`](Self::run_pending_tasks).
    /// Un [`CacheSweeper`](super::CacheSweeper) garantiza la limpieza aunque
    /// no haya trafico.
    pub fn new(
        engine: Arc<dyn ConfigQueryEngine>,
        gray_rules: Arc<dyn GrayReleaseRules>,
        settings: CacheSettings,
    ) -> Self {
        let metrics = CacheMetrics::new();
        let expired_keys = Arc::new(Mutex::new(Vec::new()));

        // Las entries expiradas o desalojadas por tamano dejan sus filas en
        // el index; se encolan y se limpian en drain_evicted.
        let eviction_metrics = metrics.clone();
        let eviction_queue = Arc::clone(&expired_keys);
        let responses = Cache::builder()
            .max_capacity(settings.max_capacity_bytes)
            .weigher(|key: &String, value: &Arc<RenderedResponse>| -> u32 {
                u32::try_from(key.len() + value.weight()).unwrap_or(u32::MAX)
            })
            .time_to_live(settings.ttl())
            .eviction_listener(move |key: Arc<String>, _value, cause| {
                let reason = match cause {
                    RemovalCause::Expired => "ttl",
                    RemovalCause::Size => "capacity",
                    RemovalCause::Explicit => "explicit",
                    RemovalCause::Replaced => "replaced",
                };
                eviction_metrics.record_eviction(reason, 1);

                if matches!(cause, RemovalCause::Expired | RemovalCause::Size) {
                    eviction_queue.lock().push((*key).clone());
                }
            })
            .build();

        let recent_releases = moka::sync::Cache::builder()
            .max_capacity(settings.recent_release_capacity)
            .time_to_live(settings.recent_release_window())
            .build();

        Self {
            responses,
            index: Arc::new(WatchKeyIndex::new()),
            engine,
            gray_rules,
            settings: Arc::new(settings),
            release_epoch: Arc::new(AtomicU64::new(0)),
            recent_releases,
            expired_keys,
            metrics,
        }
    }

    /// Retorna la respuesta renderizada para la coordenada y el formato.
    ///
    /// Un hit devuelve el mismo `Arc` guardado. En un miss solo una tarea
    /// por cache key consulta el engine; las demas esperan su resultado.
    /// Si el cliente tiene una gray release rule (o el cache esta
    /// deshabilitado) la respuesta se calcula siempre y no se guarda ni se
    /// indexa.
    ///
    /// # Errors
    ///
    /// `CacheError::Query` si el engine falla o la respuesta no se puede
    /// renderizar. Nada queda guardado ni indexado para ese intento.
    pub async fn query(
        &self,
        coordinate: &ConfigCoordinate,
        client: &ClientIdentity,
        format: OutputFormat,
    ) -> Result<Arc<RenderedResponse>, CacheError> {
        if self.bypasses_cache(coordinate, client) {
            self.metrics.record_bypass();
            debug!(coordinate = %coordinate, "Bypassing cache, computing fresh response");
            let (response, _) = self.compute(coordinate, client, format).await?;
            return Ok(response);
        }

        let start = Instant::now();
        let cache_key = CacheKey::new(format, coordinate);

        // Verificar si existe primero
        if let Some(cached) = self.responses.get(cache_key.as_str()).await {
            self.metrics.record_hit();
            self.metrics
                .record_operation_duration("query_hit", start.elapsed());
            return Ok(cached);
        }

        let epoch = self.release_epoch.load(Ordering::Acquire);
        let mut registered: Option<BTreeSet<String>> = None;

        let entry = self
            .responses
            .entry_by_ref(cache_key.as_str())
            .or_try_insert_with(async {
                let (response, watch_keys) = self.compute(coordinate, client, format).await?;
                // Indexar antes de guardar: una entry nunca es visible sin
                // sus filas en el index.
                for watch_key in &watch_keys {
                    self.index
                        .register_dependency(watch_key, cache_key.as_str());
                }
                registered = Some(watch_keys);
                Ok::<_, VortexError>(response)
            })
            .await
            .map_err(CacheError::Query)?;

        if !entry.is_fresh() {
            // Otra tarea lo calculo mientras esperabamos
            self.metrics.record_hit();
            return Ok(entry.into_value());
        }

        self.metrics.record_miss();
        let response = entry.into_value();

        if let Some(watch_keys) = registered {
            if watch_keys.is_empty() {
                warn!(
                    cache_key = %cache_key,
                    engine = self.engine.name(),
                    "Response cached without watch keys, only TTL will evict it"
                );
            } else if !self.dependencies_intact(cache_key.as_str(), &watch_keys, epoch) {
                debug!(
                    cache_key = %cache_key,
                    "Release raced with cache population, dropping fresh entry"
                );
                self.invalidate(cache_key.as_str()).await;
            }
        }

        self.drain_evicted().await;

        self.metrics
            .record_operation_duration("query_miss", start.elapsed());
        self.update_size_gauges();

        Ok(response)
    }

    /// Invalida todas las entries que dependen de `watch_key`.
    ///
    /// Al retornar, ninguna entry indexada bajo `watch_key` al momento de
    /// la llamada sigue en el cache. Idempotente: repetir el evento no
    /// tiene efecto. Retorna el numero de entries invalidadas.
    pub async fn on_release_event(&self, watch_key: &str) -> usize {
        let start = Instant::now();

        let epoch = self.release_epoch.fetch_add(1, Ordering::AcqRel) + 1;
        self.recent_releases.insert(
            normalize_key(watch_key, KeyCase::Insensitive).into_owned(),
            epoch,
        );

        let cache_keys = self.index.evict_by_watch_key(watch_key);
        for cache_key in &cache_keys {
            self.responses.invalidate(cache_key.as_str()).await;
        }

        self.metrics.record_release_event();
        self.metrics
            .record_operation_duration("release_event", start.elapsed());
        self.update_size_gauges();

        if cache_keys.is_empty() {
            debug!(watch_key = %watch_key, "Release event matched no cached entries");
        } else {
            info!(
                watch_key = %watch_key,
                count = cache_keys.len(),
                "Cache entries invalidated by release"
            );
        }

        cache_keys.len()
    }

    /// Invalida una entrada especifica y sus filas del index.
    pub async fn invalidate(&self, cache_key: &str) {
        self.responses.invalidate(cache_key).await;
        self.index.evict_by_cache_key(cache_key);
    }

    /// Invalida todas las entradas.
    pub fn invalidate_all(&self) {
        // Index primero: una entry registrada antes y guardada despues no
        // pasa la verificacion de filas.
        self.index.clear();
        self.responses.invalidate_all();
        self.expired_keys.lock().clear();
        info!("All cache entries invalidated");
    }

    /// Ejecuta el mantenimiento pendiente: expira entries y limpia las
    /// filas del index de las entries expiradas o desalojadas.
    pub async fn run_pending_tasks(&self) {
        self.responses.run_pending_tasks().await;
        self.drain_evicted().await;
        self.update_size_gauges();
    }

    /// Numero de keys desalojadas cuyas filas aun no se limpiaron.
    pub fn pending_evictions(&self) -> usize {
        self.expired_keys.lock().len()
    }

    /// Retorna el numero aproximado de entries en cache.
    pub fn entry_count(&self) -> u64 {
        self.responses.entry_count()
    }

    /// True si hay una respuesta guardada para la key.
    pub fn contains(&self, cache_key: &str) -> bool {
        self.responses.contains_key(cache_key)
    }

    /// Retorna el index de watch keys.
    pub fn index(&self) -> &WatchKeyIndex {
        &self.index
    }

    /// Retorna las metricas para acceso externo.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    fn bypasses_cache(&self, coordinate: &ConfigCoordinate, client: &ClientIdentity) -> bool {
        !self.settings.enabled
            || self.gray_rules.has_override(
                coordinate.app_id(),
                client.ip.as_deref(),
                client.label.as_deref(),
                coordinate.namespace(),
            )
    }

    async fn compute(
        &self,
        coordinate: &ConfigCoordinate,
        client: &ClientIdentity,
        format: OutputFormat,
    ) -> vortex_core::Result<(Arc<RenderedResponse>, BTreeSet<String>)> {
        let release = self
            .engine
            .query_config(coordinate, client)
            .await
            .inspect_err(|e| {
                warn!(
                    coordinate = %coordinate,
                    engine = self.engine.name(),
                    error = %e,
                    "Config query failed"
                );
            })?;

        let response = render(&release, format)?;
        Ok((Arc::new(response), release.watch_keys))
    }

    /// True if no watch key was released since `epoch` and every row is
    /// still indexed.
    fn dependencies_intact(
        &self,
        cache_key: &str,
        watch_keys: &BTreeSet<String>,
        epoch: u64,
    ) -> bool {
        watch_keys.iter().all(|watch_key| {
            let folded = normalize_key(watch_key, KeyCase::Insensitive);
            let released_since = self
                .recent_releases
                .get(&*folded)
                .is_some_and(|released| released > epoch);

            !released_since && self.index.contains(watch_key, cache_key)
        })
    }

    /// Drops the index rows of keys evicted by TTL or capacity.
    ///
    /// A key cached again since its eviction keeps its rows: the miss that
    /// stored it registered them.
    async fn drain_evicted(&self) {
        let evicted = std::mem::take(&mut *self.expired_keys.lock());
        if evicted.is_empty() {
            return;
        }

        let mut cleaned = 0;
        for cache_key in &evicted {
            if self.responses.contains_key(cache_key.as_str()) {
                continue;
            }

            self.index.evict_by_cache_key(cache_key);
            cleaned += 1;
            // Stored between the check and the cleanup: its rows are gone
            if self.responses.contains_key(cache_key.as_str()) {
                self.invalidate(cache_key).await;
            }
        }

        debug!(
            evicted = evicted.len(),
            cleaned, "Cleaned index rows of evicted cache entries"
        );
    }

    fn update_size_gauges(&self) {
        self.metrics
            .update_sizes(self.responses.entry_count(), self.index.row_count());
    }
}

#[async_trait]
impl ReleaseMessageListener for ConfigFileCache {
    async fn handle_message(&self, message: &ReleaseMessage, topic: &str) {
        if topic != RELEASE_TOPIC || message.message.is_empty() {
            return;
        }

        self.on_release_event(&message.message).await;
    }
}
