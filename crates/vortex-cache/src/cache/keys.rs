//! Cache key generation.

use std::fmt;

use vortex_core::{ConfigCoordinate, KEY_SEPARATOR, OutputFormat};

/// Key unica para una respuesta renderizada.
///
/// Formato: `format+app_id+cluster+namespace+data_center`. A diferencia de
/// las watch keys, los valores conservan mayusculas y minusculas. Cada
/// componente escapa `\` y `+`, asi dos coordenadas distintas nunca
/// producen la misma key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Crea la cache key para una coordenada y un formato.
    ///
    /// # Examples
    ///
    /// ```
    /// use vortex_cache::cache::CacheKey;
    /// use vortex_core::{ConfigCoordinate, OutputFormat};
    ///
    /// let coordinate = ConfigCoordinate::new("MyApp", "default", "application")
    ///     .unwrap()
    ///     .with_data_center("dc1");
    /// let key = CacheKey::new(OutputFormat::Json, &coordinate);
    ///
    /// assert_eq!(key.as_str(), "json+MyApp+default+application+dc1");
    /// ```
    pub fn new(format: OutputFormat, coordinate: &ConfigCoordinate) -> Self {
        let parts = [
            format.as_str(),
            coordinate.app_id(),
            coordinate.cluster(),
            coordinate.namespace(),
            coordinate.data_center().unwrap_or(""),
        ];

        let mut key = String::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                key.push(KEY_SEPARATOR);
            }
            escape_into(&mut key, part);
        }

        Self(key)
    }

    /// Retorna la key como string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn escape_into(out: &mut String, part: &str) {
    for c in part.chars() {
        if c == '\\' || c == KEY_SEPARATOR {
            out.push('\\');
        }
        out.push(c);
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.0
    }
}
