use serde::{Deserialize, Serialize};

use super::{LaunchPhase, PrefetchGeneration};
use crate::onboarding::OnboardingDecision;

/// Observable launch state the presentation layer subscribes to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaunchSnapshot {
    pub generation: PrefetchGeneration,
    pub phase: LaunchPhase,
    /// Onboarding screen currently presented, if any
    pub decision: OnboardingDecision,
}
