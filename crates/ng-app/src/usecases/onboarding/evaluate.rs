use std::sync::Arc;

use tracing::{debug, info_span, warn, Instrument};

use ng_core::ports::PersistedFlagStorePort;
use ng_core::{OnboardingDecision, OnboardingEligibility, OnboardingFlag, OnboardingGate, PersistedFlags};

/// Use case for evaluating which onboarding screen to present.
pub struct EvaluateOnboarding {
    flags: Arc<dyn PersistedFlagStorePort>,
}

impl EvaluateOnboarding {
    pub fn new(flags: Arc<dyn PersistedFlagStorePort>) -> Self {
        Self { flags }
    }

    /// Read the persisted flags and consult the gate.
    pub async fn execute(&self) -> OnboardingDecision {
        let span = info_span!("usecase.evaluate_onboarding.execute");

        async {
            let flags = self.load_flags().await;
            let decision = OnboardingGate::decide(&flags, &OnboardingEligibility::from_flags(&flags));
            debug!(?flags, ?decision, "onboarding gate evaluated");
            decision
        }
        .instrument(span)
        .await
    }

    /// Re-evaluate after `dismissed` was marked seen.
    ///
    /// The dismissed flag is overlaid in memory, so a failed write can never
    /// present the same screen twice in one session.
    pub async fn execute_after_dismissal(&self, dismissed: OnboardingFlag) -> OnboardingDecision {
        let span = info_span!("usecase.evaluate_onboarding.after_dismissal", ?dismissed);

        async {
            let mut flags = self.load_flags().await;
            flags.mark_seen(dismissed);
            let decision = OnboardingGate::decide(&flags, &OnboardingEligibility::from_flags(&flags));
            debug!(?flags, ?decision, "onboarding gate re-evaluated");
            decision
        }
        .instrument(span)
        .await
    }

    async fn load_flags(&self) -> PersistedFlags {
        match self.flags.get_flags().await {
            Ok(flags) => flags,
            Err(err) => {
                warn!(error = %err, "Failed to read onboarding flags, treating them as absent");
                PersistedFlags::default()
            }
        }
    }
}
