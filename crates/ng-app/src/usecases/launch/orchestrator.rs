//! Launch orchestrator.
//!
//! ```text
//! on_auth_changed(Authenticated)
//!   ↓ new generation, phase = Prefetching
//! PrefetchCoordinator (spawned, wait-for-all)
//!   ↓
//! on_prefetch_complete(generation, batch)
//!   ↓ generation still current?
//! phase = OnboardingEval → EvaluateOnboarding → phase = Ready
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use ng_core::ports::LaunchStateEmitter;
use ng_core::{
    AuthState, LaunchPhase, LaunchSnapshot, OnboardingDecision, OnboardingFlag, PrefetchBatch,
    PrefetchGeneration,
};

use super::context::{LaunchContext, LaunchState};
use super::deferred::DeferredTransitions;
use super::resources::{LaunchPrefetchSources, LaunchResource, PrefetchedResources};
use crate::usecases::onboarding::{EvaluateOnboarding, MarkOnboardingSeen};
use crate::usecases::prefetch::PrefetchCoordinator;

/// Result of handing a settled batch to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The batch belonged to the current generation and launch is ready
    Applied(LaunchSnapshot),
    /// The batch was started under a superseded generation
    DiscardedStale {
        generation: PrefetchGeneration,
        current: PrefetchGeneration,
    },
    /// The current generation already left `Prefetching`
    AlreadySettled,
}

/// Result of dismissing an onboarding screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOutcome {
    /// The dismissed screen is not the one currently presented
    Ignored,
    /// Dismissal recorded; `next` is the chained decision (may be deferred)
    Dismissed { next: OnboardingDecision },
}

/// Helper for constructing the orchestrator with explicit dependency fields.
pub struct LaunchOrchestratorDeps {
    pub coordinator: PrefetchCoordinator,
    pub sources: LaunchPrefetchSources,
    pub evaluate_onboarding: Arc<EvaluateOnboarding>,
    pub mark_seen: Arc<MarkOnboardingSeen>,
    pub state_emitter: Arc<dyn LaunchStateEmitter>,
    pub chain_delay: Duration,
}

/// Top-level launch state machine.
///
/// Owns the launch phase and the generation token; nothing else mutates them.
pub struct LaunchOrchestrator {
    context: LaunchContext,
    coordinator: PrefetchCoordinator,
    sources: LaunchPrefetchSources,
    evaluate_onboarding: Arc<EvaluateOnboarding>,
    mark_seen: Arc<MarkOnboardingSeen>,
    state_emitter: Arc<dyn LaunchStateEmitter>,
    deferred: DeferredTransitions,
    chain_delay: Duration,
}

impl LaunchOrchestrator {
    pub fn from_deps(deps: LaunchOrchestratorDeps) -> Self {
        let LaunchOrchestratorDeps {
            coordinator,
            sources,
            evaluate_onboarding,
            mark_seen,
            state_emitter,
            chain_delay,
        } = deps;

        Self {
            context: LaunchContext::new(),
            coordinator,
            sources,
            evaluate_onboarding,
            mark_seen,
            state_emitter,
            deferred: DeferredTransitions::new(),
            chain_delay,
        }
    }

    pub async fn snapshot(&self) -> LaunchSnapshot {
        self.context.get_state().await.snapshot()
    }

    /// Fallback-substituted resources of the current generation, once settled.
    pub async fn prefetched(&self) -> Option<PrefetchedResources> {
        self.context.get_state().await.resources
    }

    /// Handle an auth transition.
    ///
    /// Every call starts a fresh generation, which makes in-flight results of
    /// older generations stale. For `Authenticated` the prefetch batch is
    /// spawned and its handle returned; nothing is retried automatically.
    pub async fn on_auth_changed(self: &Arc<Self>, state: AuthState) -> Option<JoinHandle<()>> {
        let span = info_span!("usecase.launch_orchestrator.on_auth_changed", ?state);

        async {
            let _dispatch_guard = self.context.acquire_dispatch_lock().await;
            self.deferred.cancel_all().await;

            let phase = match state {
                AuthState::Unauthenticated => LaunchPhase::Login,
                AuthState::Authenticated => LaunchPhase::Prefetching,
            };
            let (generation, snapshot) = self
                .context
                .update(|launch| {
                    let generation = launch.begin_generation(phase);
                    (generation, launch.snapshot())
                })
                .await;
            info!(generation = %generation, phase = ?phase, "launch generation started");
            self.emit(snapshot).await;

            if !state.is_authenticated() {
                return None;
            }

            let this = Arc::clone(self);
            let tasks = self.sources.tasks();
            Some(tokio::spawn(
                async move {
                    let batch = this.coordinator.run(generation, tasks).await;
                    this.on_prefetch_complete(generation, batch).await;
                }
                .in_current_span(),
            ))
        }
        .instrument(span)
        .await
    }

    /// Apply a settled prefetch batch.
    ///
    /// A batch from a superseded generation is discarded without touching
    /// state. Otherwise the resources are stored, the onboarding gate is
    /// consulted and the phase reaches `Ready` exactly once.
    ///
    /// The gate reads the flag store without holding the dispatch lock, so an
    /// auth change is never queued behind it. The generation is checked again
    /// once the gate returns.
    pub async fn on_prefetch_complete(
        &self,
        generation: PrefetchGeneration,
        batch: PrefetchBatch<LaunchResource>,
    ) -> CompletionOutcome {
        let span = info_span!(
            "usecase.launch_orchestrator.on_prefetch_complete",
            generation = %generation
        );

        async {
            {
                let _dispatch_guard = self.context.acquire_dispatch_lock().await;
                let resources = PrefetchedResources::from_batch(batch);

                let current = self.context.get_state().await;
                if let Some(outcome) =
                    Self::check_current(&current, generation, LaunchPhase::Prefetching)
                {
                    return outcome;
                }

                if !resources.failed_tasks.is_empty() {
                    info!(failed = ?resources.failed_tasks, "launch continuing with fallback values");
                }
                let snapshot = match self
                    .context
                    .update(|launch| {
                        launch.resources = Some(resources);
                        launch.advance(LaunchPhase::OnboardingEval)?;
                        Ok::<_, ng_core::LaunchError>(launch.snapshot())
                    })
                    .await
                {
                    Ok(snapshot) => snapshot,
                    Err(err) => {
                        warn!(error = %err, "unexpected launch phase transition");
                        return CompletionOutcome::AlreadySettled;
                    }
                };
                self.emit(snapshot).await;
            }

            let decision = self.evaluate_onboarding.execute().await;

            let _dispatch_guard = self.context.acquire_dispatch_lock().await;
            let current = self.context.get_state().await;
            if let Some(outcome) =
                Self::check_current(&current, generation, LaunchPhase::OnboardingEval)
            {
                return outcome;
            }

            let snapshot = match self
                .context
                .update(|launch| {
                    launch.decision = decision;
                    launch.advance(LaunchPhase::Ready)?;
                    Ok::<_, ng_core::LaunchError>(launch.snapshot())
                })
                .await
            {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!(error = %err, "unexpected launch phase transition");
                    return CompletionOutcome::AlreadySettled;
                }
            };
            info!(decision = ?decision, "launch ready");
            self.emit(snapshot.clone()).await;

            CompletionOutcome::Applied(snapshot)
        }
        .instrument(span)
        .await
    }

    /// `None` when `current` is still in `expected` for `generation`.
    fn check_current(
        current: &LaunchState,
        generation: PrefetchGeneration,
        expected: LaunchPhase,
    ) -> Option<CompletionOutcome> {
        if current.generation != generation {
            debug!(current = %current.generation, "discarding stale prefetch results");
            return Some(CompletionOutcome::DiscardedStale {
                generation,
                current: current.generation,
            });
        }
        if current.phase != expected {
            debug!(phase = ?current.phase, "prefetch results already applied");
            return Some(CompletionOutcome::AlreadySettled);
        }
        None
    }

    /// Record the dismissal of the presented onboarding screen and chain into
    /// the next decision without a new prefetch cycle.
    ///
    /// The presented decision clears immediately; the next one is published
    /// after the configured chain delay unless a new generation starts first.
    /// Like the launch gate, the flag store is written and read outside the
    /// dispatch lock.
    pub async fn dismiss_onboarding(self: &Arc<Self>, flag: OnboardingFlag) -> DismissOutcome {
        let span = info_span!("usecase.launch_orchestrator.dismiss_onboarding", ?flag);

        async {
            let presented = self.context.get_state().await;
            if !Self::is_presented(&presented, flag) {
                debug!(presented = ?presented.decision, "dismissed screen is not presented");
                return DismissOutcome::Ignored;
            }

            self.mark_seen.execute(flag).await;
            let next = self.evaluate_onboarding.execute_after_dismissal(flag).await;

            let _dispatch_guard = self.context.acquire_dispatch_lock().await;
            let current = self.context.get_state().await;
            if current.generation != presented.generation || !Self::is_presented(&current, flag) {
                debug!(
                    presented = ?current.decision,
                    generation = %current.generation,
                    "launch moved on during dismissal"
                );
                return DismissOutcome::Ignored;
            }

            let snapshot = self
                .context
                .update(|launch| {
                    launch.decision = OnboardingDecision::None;
                    launch.snapshot()
                })
                .await;
            self.emit(snapshot).await;

            if next.is_none() {
                info!("onboarding finished");
                return DismissOutcome::Dismissed { next };
            }

            if self.chain_delay.is_zero() {
                self.present(&current, next).await;
            } else {
                let this = Arc::clone(self);
                let generation = current.generation;
                self.deferred
                    .schedule(self.chain_delay, async move {
                        this.present_deferred(generation, next).await;
                    })
                    .await;
            }

            DismissOutcome::Dismissed { next }
        }
        .instrument(span)
        .await
    }

    fn is_presented(state: &LaunchState, flag: OnboardingFlag) -> bool {
        state.phase == LaunchPhase::Ready && state.decision.flag() == Some(flag)
    }

    async fn present_deferred(&self, generation: PrefetchGeneration, decision: OnboardingDecision) {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let current = self.context.get_state().await;
        if current.generation != generation {
            debug!(generation = %generation, "dropping deferred onboarding transition");
            return;
        }
        self.present(&current, decision).await;
    }

    /// Publish `decision` if launch is still ready with nothing presented.
    /// Caller must hold the dispatch lock.
    async fn present(&self, expected: &LaunchState, decision: OnboardingDecision) {
        let snapshot = self
            .context
            .update(|launch| {
                if launch.generation != expected.generation
                    || launch.phase != LaunchPhase::Ready
                    || !launch.decision.is_none()
                {
                    return None;
                }
                launch.decision = decision;
                Some(launch.snapshot())
            })
            .await;

        if let Some(snapshot) = snapshot {
            info!(decision = ?decision, "presenting chained onboarding screen");
            self.emit(snapshot).await;
        }
    }

    async fn emit(&self, snapshot: LaunchSnapshot) {
        if let Err(err) = self.state_emitter.emit_launch_state(snapshot).await {
            warn!(error = %err, "Failed to emit launch state");
        }
    }

    #[cfg(test)]
    pub(crate) async fn pending_transitions(&self) -> usize {
        self.deferred.pending_count().await
    }
}
