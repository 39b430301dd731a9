//! Watch key assembly.
//!
//! A watch key names a unit of change: `app_id+cluster+namespace`. The
//! release-message stream publishes one of these whenever a namespace is
//! released in a cluster.

use std::collections::BTreeSet;

use crate::coordinate::{ConfigCoordinate, DEFAULT_CLUSTER};

/// Separator between watch key and cache key components.
pub const KEY_SEPARATOR: char = '+';

/// Helpers to build watch keys.
pub struct WatchKeys;

impl WatchKeys {
    /// Builds the watch key for one cluster of a namespace.
    ///
    /// ```
    /// use vortex_core::WatchKeys;
    ///
    /// assert_eq!(WatchKeys::single("app", "default", "redis"), "app+default+redis");
    /// ```
    pub fn single(app_id: &str, cluster: &str, namespace: &str) -> String {
        [app_id, cluster, namespace].join(&KEY_SEPARATOR.to_string())
    }

    /// Builds every watch key a namespace read can depend on.
    ///
    /// The result contains the requested cluster, the data center when it
    /// is present and differs from the cluster, and the `default` cluster,
    /// since a release to `default` applies to clusters that have no
    /// release of their own.
    pub fn assemble(
        app_id: &str,
        cluster: &str,
        namespace: &str,
        data_center: Option<&str>,
    ) -> BTreeSet<String> {
        let mut clusters = vec![cluster];
        if let Some(dc) = data_center.filter(|dc| *dc != cluster) {
            clusters.push(dc);
        }
        if cluster != DEFAULT_CLUSTER {
            clusters.push(DEFAULT_CLUSTER);
        }

        clusters
            .into_iter()
            .map(|c| Self::single(app_id, c, namespace))
            .collect()
    }

    /// Shorthand for [`WatchKeys::assemble`] on a coordinate.
    pub fn for_coordinate(coordinate: &ConfigCoordinate) -> BTreeSet<String> {
        Self::assemble(
            coordinate.app_id(),
            coordinate.cluster(),
            coordinate.namespace(),
            coordinate.data_center(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cluster_only_once() {
        let keys = WatchKeys::assemble("app", "default", "application", None);
        assert_eq!(keys.len(), 1);
        assert!(keys.contains("app+default+application"));
    }

    #[test]
    fn test_specific_cluster_adds_default() {
        let keys = WatchKeys::assemble("app", "sh", "application", None);
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("app+sh+application"));
        assert!(keys.contains("app+default+application"));
    }

    #[test]
    fn test_data_center_added_when_different() {
        let keys = WatchKeys::assemble("app", "sh", "application", Some("dc1"));
        assert_eq!(keys.len(), 3);
        assert!(keys.contains("app+dc1+application"));

        let same = WatchKeys::assemble("app", "sh", "application", Some("sh"));
        assert_eq!(same.len(), 2);
    }

    #[test]
    fn test_for_coordinate() {
        let coordinate = ConfigCoordinate::new("app", "sh", "redis").unwrap();
        let keys = WatchKeys::for_coordinate(&coordinate);

        assert!(keys.contains("app+sh+redis"));
        assert!(keys.contains("app+default+redis"));
    }
}
