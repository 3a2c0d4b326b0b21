//! Signals produced by the foreground resync path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Broadcast to content consumers (content list, feed) after pending
/// shared content was flushed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentChanged {
    pub at: DateTime<Utc>,
}

impl ContentChanged {
    pub fn now() -> Self {
        Self { at: Utc::now() }
    }
}
