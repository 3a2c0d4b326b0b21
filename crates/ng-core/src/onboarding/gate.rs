//! Onboarding gate.
//!
//! Pure decision function over persisted flags and eligibility. Recomputing
//! with unchanged inputs always yields the same decision.

use super::{OnboardingDecision, OnboardingEligibility, PersistedFlags};

pub struct OnboardingGate;

impl OnboardingGate {
    /// Decide which onboarding screen to present. First match wins:
    /// 1. tutorial not seen -> `Tutorial`
    /// 2. eligible for beta welcome and not seen -> `BetaWelcome`
    /// 3. otherwise -> `None`
    pub fn decide(
        flags: &PersistedFlags,
        eligibility: &OnboardingEligibility,
    ) -> OnboardingDecision {
        if !flags.has_seen_tutorial {
            return OnboardingDecision::Tutorial;
        }

        if eligibility.beta_welcome_eligible && !flags.beta_welcome_seen {
            return OnboardingDecision::BetaWelcome;
        }

        OnboardingDecision::None
    }
}
