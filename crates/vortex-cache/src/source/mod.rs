//! Collaborators the cache consults: the config query engine and the
//! gray-release rules.

mod traits;

pub use traits::{ConfigQueryEngine, GrayReleaseRules, NoGrayReleaseRules};
