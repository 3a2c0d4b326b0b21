//! # ng-core
//!
//! Core domain models and business rules for the Nugget launch flow.
//!
//! This crate contains pure logic without any infrastructure dependencies:
//! launch phases, prefetch outcomes, the onboarding gate and the ports
//! implemented by the surrounding application.

pub mod auth;
pub mod config;
pub mod launch;
pub mod onboarding;
pub mod ports;
pub mod preferences;
pub mod prefetch;
pub mod resync;

// Re-export commonly used types at the crate root
pub use auth::AuthState;
pub use config::LaunchConfig;
pub use launch::{LaunchError, LaunchPhase, LaunchSnapshot, PrefetchGeneration};
pub use onboarding::{
    OnboardingDecision, OnboardingEligibility, OnboardingFlag, OnboardingGate, PersistedFlags,
};
pub use preferences::Preferences;
pub use prefetch::{PrefetchBatch, PrefetchEntry, PrefetchErrorKind, PrefetchTaskResult};
pub use resync::ContentChanged;
