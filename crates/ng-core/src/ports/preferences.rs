use async_trait::async_trait;

use crate::preferences::Preferences;

/// Port for fetching remote user preferences.
///
/// Failures are expected; callers substitute `Preferences::default()`.
#[async_trait]
pub trait PreferencesPort: Send + Sync {
    async fn get(&self) -> anyhow::Result<Preferences>;
}
