//! User preferences fetched from the remote service during launch.

use serde::{Deserialize, Serialize};

/// Remote user preferences.
///
/// `Preferences::default()` is the well-defined fallback used when the
/// preferences fetch fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether the daily digest of saved nuggets is delivered
    pub digest_enabled: bool,
    /// Local hour (0-23) at which the digest is delivered
    pub digest_hour: u8,
    /// Language used when summarizing saved content
    pub summary_language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            digest_enabled: true,
            digest_hour: 8,
            summary_language: "en".to_string(),
        }
    }
}
