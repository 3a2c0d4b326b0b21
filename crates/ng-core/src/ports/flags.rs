//! Persisted onboarding flag port
//!
//! Implementations are provided by the infrastructure layer (e.g. file-based storage).

use async_trait::async_trait;

use crate::onboarding::{OnboardingFlag, PersistedFlags};

#[async_trait]
pub trait PersistedFlagStorePort: Send + Sync {
    /// Read the current flags
    async fn get_flags(&self) -> anyhow::Result<PersistedFlags>;

    /// Persist a single flag as seen
    async fn mark_seen(&self, flag: OnboardingFlag) -> anyhow::Result<()>;
}
