//! Release data returned by the query engine and rendered responses.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::format::OutputFormat;

/// Configuration of one namespace as of its latest release.
///
/// Besides the key/value pairs, the engine reports every watch key the
/// result depends on. A response merged from a public and a private
/// namespace depends on the watch keys of both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasedConfig {
    /// Application the release belongs to
    pub app_id: String,

    /// Cluster the release was resolved from
    pub cluster: String,

    /// Namespace name, including its extension for non-properties files
    pub namespace_name: String,

    /// Identifier of the release (or merged releases) served
    pub release_key: String,

    /// Configuration entries in release order
    pub configurations: IndexMap<String, String>,

    /// Watch keys whose release must invalidate this result
    #[serde(default)]
    pub watch_keys: BTreeSet<String>,
}

impl ReleasedConfig {
    /// Creates an empty release for a namespace.
    pub fn new(
        app_id: impl Into<String>,
        cluster: impl Into<String>,
        namespace_name: impl Into<String>,
        release_key: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            cluster: cluster.into(),
            namespace_name: namespace_name.into(),
            release_key: release_key.into(),
            configurations: IndexMap::new(),
            watch_keys: BTreeSet::new(),
        }
    }

    /// Adds a configuration entry, keeping insertion order.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.configurations.insert(key.into(), value.into());
        self
    }

    /// Adds watch keys the result depends on.
    pub fn with_watch_keys<I, S>(mut self, watch_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.watch_keys.extend(watch_keys.into_iter().map(Into::into));
        self
    }
}

/// A response body ready to be written to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    /// Rendered body
    pub body: String,
    /// Content-Type header value
    pub content_type: &'static str,
    /// Format the body was rendered in
    pub format: OutputFormat,
}

impl RenderedResponse {
    pub fn new(body: impl Into<String>, content_type: &'static str, format: OutputFormat) -> Self {
        Self {
            body: body.into(),
            content_type,
            format,
        }
    }

    /// Approximate heap footprint, used to weigh cache entries.
    pub fn weight(&self) -> usize {
        self.body.len()
    }
}
