//! Release message types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Topic on which namespace releases are published.
pub const RELEASE_TOPIC: &str = "vortex-release";

/// A published release. `message` is the watch key that changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseMessage {
    /// Monotonic id assigned by the message store
    pub id: u64,
    /// Watch key of the released namespace
    pub message: String,
}

impl ReleaseMessage {
    pub fn new(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}

/// A message together with the topic it was published on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEnvelope {
    pub message: ReleaseMessage,
    pub topic: String,
}

impl ReleaseEnvelope {
    pub fn new(message: ReleaseMessage, topic: impl Into<String>) -> Self {
        Self {
            message,
            topic: topic.into(),
        }
    }

    /// Envelope on [`RELEASE_TOPIC`].
    pub fn release(id: u64, watch_key: impl Into<String>) -> Self {
        Self::new(ReleaseMessage::new(id, watch_key), RELEASE_TOPIC)
    }
}

/// Receives release messages.
#[async_trait]
pub trait ReleaseMessageListener: Send + Sync {
    /// Handles one message. Called again for redelivered messages.
    async fn handle_message(&self, message: &ReleaseMessage, topic: &str);
}
