//! Release message delivery.
//!
//! Release messages carry a watch key. They arrive at least once, in no
//! particular order across watch keys, and may be duplicated; listeners
//! must be idempotent.

mod dispatcher;
mod message;

pub use dispatcher::{DispatcherHandle, ReleaseMessageDispatcher};
pub use message::{RELEASE_TOPIC, ReleaseEnvelope, ReleaseMessage, ReleaseMessageListener};
