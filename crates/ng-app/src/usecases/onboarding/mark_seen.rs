use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use ng_core::ports::PersistedFlagStorePort;
use ng_core::OnboardingFlag;

/// Use case for persisting an onboarding flag as seen after its screen is dismissed.
pub struct MarkOnboardingSeen {
    flags: Arc<dyn PersistedFlagStorePort>,
}

impl MarkOnboardingSeen {
    pub fn new(flags: Arc<dyn PersistedFlagStorePort>) -> Self {
        Self { flags }
    }

    /// Persist `flag` as seen.
    ///
    /// Returns whether the write succeeded. Failures are logged, not retried.
    pub async fn execute(&self, flag: OnboardingFlag) -> bool {
        let span = info_span!("usecase.mark_onboarding_seen.execute", ?flag);

        async {
            match self.flags.mark_seen(flag).await {
                Ok(()) => {
                    info!("Onboarding flag persisted");
                    true
                }
                Err(err) => {
                    warn!(error = %err, "Failed to persist onboarding flag");
                    false
                }
            }
        }
        .instrument(span)
        .await
    }
}
