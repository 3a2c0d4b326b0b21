//! Onboarding domain models
//!
//! This module defines the persisted onboarding flags and the pure gate
//! deciding which onboarding screen, if any, is presented after launch.

mod gate;

pub use gate::OnboardingGate;

use serde::{Deserialize, Serialize};

/// Durable onboarding flags.
///
/// Read at gate-evaluation time and written only after a screen is dismissed.
/// The default value (nothing seen) is also what a failed read degrades to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedFlags {
    /// Whether the tutorial has been dismissed at least once
    pub has_seen_tutorial: bool,
    /// Whether this account is a pre-release tester
    pub beta_welcome_eligible: bool,
    /// Whether the beta welcome screen has been dismissed
    pub beta_welcome_seen: bool,
}

impl PersistedFlags {
    /// Apply a "seen" mark in memory.
    pub fn mark_seen(&mut self, flag: OnboardingFlag) {
        match flag {
            OnboardingFlag::Tutorial => self.has_seen_tutorial = true,
            OnboardingFlag::BetaWelcome => self.beta_welcome_seen = true,
        }
    }

    pub fn is_seen(&self, flag: OnboardingFlag) -> bool {
        match flag {
            OnboardingFlag::Tutorial => self.has_seen_tutorial,
            OnboardingFlag::BetaWelcome => self.beta_welcome_seen,
        }
    }
}

/// A flag that can be marked as seen by dismissing its screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingFlag {
    Tutorial,
    BetaWelcome,
}

/// Eligibility inputs consulted by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OnboardingEligibility {
    pub beta_welcome_eligible: bool,
}

impl OnboardingEligibility {
    pub fn from_flags(flags: &PersistedFlags) -> Self {
        Self {
            beta_welcome_eligible: flags.beta_welcome_eligible,
        }
    }
}

/// Onboarding screen to present. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingDecision {
    #[default]
    None,
    Tutorial,
    BetaWelcome,
}

impl OnboardingDecision {
    /// The flag marked as seen when this screen is dismissed.
    pub fn flag(self) -> Option<OnboardingFlag> {
        match self {
            OnboardingDecision::None => None,
            OnboardingDecision::Tutorial => Some(OnboardingFlag::Tutorial),
            OnboardingDecision::BetaWelcome => Some(OnboardingFlag::BetaWelcome),
        }
    }

    pub fn is_none(self) -> bool {
        matches!(self, OnboardingDecision::None)
    }
}
