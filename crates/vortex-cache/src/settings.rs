//! Cache settings.
//!
//! Loaded in layers: built-in defaults, then an optional file (any format
//! the `config` crate understands, picked by extension), then environment
//! variables prefixed with `VORTEX_CACHE__`:
//!
//! ```text
//! VORTEX_CACHE__TTL_SECONDS=600
//! VORTEX_CACHE__MAX_CAPACITY_BYTES=104857600
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

const ENV_PREFIX: &str = "VORTEX_CACHE";
const ENV_SEPARATOR: &str = "__";

/// Configuracion del cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Si es false, cada query se calcula de nuevo y nada se guarda
    pub enabled: bool,
    /// TTL absoluto de cada respuesta en segundos (default: 1800 = 30 minutos)
    pub ttl_seconds: u64,
    /// Peso maximo del cache en bytes (default: 50 MiB)
    pub max_capacity_bytes: u64,
    /// Intervalo del sweeper en segundos (default: 60)
    pub sweep_interval_seconds: u64,
    /// Cuanto tiempo se recuerda un release event para validar los
    /// cache miss concurrentes (default: 300)
    pub recent_release_window_seconds: u64,
    /// Maximo numero de watch keys recordadas (default: 100000)
    pub recent_release_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 1800,
            max_capacity_bytes: 50 * 1024 * 1024,
            sweep_interval_seconds: 60,
            recent_release_window_seconds: 300,
            recent_release_capacity: 100_000,
        }
    }
}

impl CacheSettings {
    /// Loads settings from defaults, an optional file and the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, CacheError> {
        Self::load_from(path, None)
    }

    /// Like [`load`](Self::load), reading variables from `env` instead of
    /// the process environment when given.
    pub fn load_from(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, CacheError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let settings: CacheSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    /// Rejects values that would make the cache unusable.
    pub fn validate(&self) -> Result<(), CacheError> {
        let positive = [
            ("ttl_seconds", self.ttl_seconds),
            ("max_capacity_bytes", self.max_capacity_bytes),
            ("sweep_interval_seconds", self.sweep_interval_seconds),
            (
                "recent_release_window_seconds",
                self.recent_release_window_seconds,
            ),
            ("recent_release_capacity", self.recent_release_capacity),
        ];

        for (field, value) in positive {
            if value == 0 {
                return Err(CacheError::invalid_settings(
                    field,
                    "must be greater than zero",
                ));
            }
        }

        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }

    pub fn recent_release_window(&self) -> Duration {
        Duration::from_secs(self.recent_release_window_seconds)
    }
}
