//! Query coordinates and client identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, VortexError};

/// Cluster used when a release applies to every cluster of an app.
pub const DEFAULT_CLUSTER: &str = "default";

const PROPERTIES_SUFFIX: &str = ".properties";

/// The (app, cluster, namespace, data center) tuple a client asks for.
///
/// Component values keep their original case. The namespace drops a
/// trailing `.properties`, since `application` and
/// `application.properties` name the same namespace.
///
/// # Example
///
/// ```
/// use vortex_core::ConfigCoordinate;
///
/// let coordinate = ConfigCoordinate::new("payment", "default", "Application.properties")
///     .unwrap()
///     .with_data_center("eu-west");
///
/// assert_eq!(coordinate.namespace(), "Application");
/// assert_eq!(coordinate.data_center(), Some("eu-west"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigCoordinate {
    app_id: String,
    cluster: String,
    namespace: String,
    data_center: Option<String>,
}

impl ConfigCoordinate {
    /// Creates a coordinate, rejecting empty components.
    pub fn new(
        app_id: impl Into<String>,
        cluster: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Result<Self> {
        let app_id = app_id.into();
        let cluster = cluster.into();
        let namespace = normalize_namespace(namespace.into());

        for (field, value) in [
            ("app_id", &app_id),
            ("cluster", &cluster),
            ("namespace", &namespace),
        ] {
            if value.trim().is_empty() {
                return Err(VortexError::invalid_coordinate(field, "cannot be empty"));
            }
        }

        Ok(Self {
            app_id,
            cluster,
            namespace,
            data_center: None,
        })
    }

    /// Sets the data center the client reports. Blank values are ignored.
    pub fn with_data_center(mut self, data_center: impl Into<String>) -> Self {
        let data_center = data_center.into();
        self.data_center = if data_center.trim().is_empty() {
            None
        } else {
            Some(data_center)
        };
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn data_center(&self) -> Option<&str> {
        self.data_center.as_deref()
    }
}

impl fmt::Display for ConfigCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.app_id, self.cluster, self.namespace)?;
        if let Some(dc) = &self.data_center {
            write!(f, "@{}", dc)?;
        }
        Ok(())
    }
}

fn normalize_namespace(namespace: String) -> String {
    let len = namespace.len();
    if len >= PROPERTIES_SUFFIX.len()
        && namespace.is_char_boundary(len - PROPERTIES_SUFFIX.len())
        && namespace[len - PROPERTIES_SUFFIX.len()..].eq_ignore_ascii_case(PROPERTIES_SUFFIX)
    {
        namespace[..len - PROPERTIES_SUFFIX.len()].to_string()
    } else {
        namespace
    }
}

/// Who is asking: used for gray-release rule matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientIdentity {
    /// Client IP as reported by the caller.
    pub ip: Option<String>,
    /// Client label (free-form tag set by the client).
    pub label: Option<String>,
}

impl ClientIdentity {
    pub fn new(ip: Option<String>, label: Option<String>) -> Self {
        Self { ip, label }
    }

    /// An identity with no IP and no label. Never matches a gray rule.
    pub fn anonymous() -> Self {
        Self::default()
    }
}
