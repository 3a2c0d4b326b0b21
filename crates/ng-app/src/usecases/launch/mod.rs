//! Launch orchestration.
//!
//! The orchestrator owns the launch phase and the generation token. Each
//! authenticated transition starts a new prefetch generation; a completion
//! only advances shared state when its generation is still current.

mod context;
mod deferred;
mod orchestrator;
mod resources;

pub use context::{LaunchContext, LaunchState};
pub use deferred::DeferredTransitions;
pub use orchestrator::{
    CompletionOutcome, DismissOutcome, LaunchOrchestrator, LaunchOrchestratorDeps,
};
pub use resources::{
    LaunchPrefetchSources, LaunchResource, PrefetchedResources, CONTENT_TASK, NOTIFICATIONS_TASK,
    PREFERENCES_TASK,
};
