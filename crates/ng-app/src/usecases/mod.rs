//! Launch use cases
//!
//! ```text
//! auth change ──> LaunchOrchestrator ──> PrefetchCoordinator (fan-out, wait-for-all)
//!                        │
//!                        └──> EvaluateOnboarding ──> OnboardingGate
//!
//! app activated ──> ForegroundResync (never touches LaunchPhase)
//! ```

pub mod foreground_resync;
pub mod launch;
pub mod notifications;
pub mod onboarding;
pub mod prefetch;

pub use foreground_resync::{ForegroundResync, ResyncOutcome};
pub use launch::{
    CompletionOutcome, DismissOutcome, LaunchOrchestrator, LaunchOrchestratorDeps,
    LaunchPrefetchSources, LaunchResource, PrefetchedResources,
};
pub use notifications::RegisterNotifications;
pub use onboarding::{EvaluateOnboarding, MarkOnboardingSeen};
pub use prefetch::{PrefetchCoordinator, PrefetchTask};
