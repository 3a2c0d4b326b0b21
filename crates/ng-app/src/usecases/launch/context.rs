use tokio::sync::{Mutex, MutexGuard};

use ng_core::{LaunchError, LaunchPhase, LaunchSnapshot, OnboardingDecision, PrefetchGeneration};

use super::resources::PrefetchedResources;

/// Shared launch state.
#[derive(Debug, Clone, Default)]
pub struct LaunchState {
    pub generation: PrefetchGeneration,
    pub phase: LaunchPhase,
    pub decision: OnboardingDecision,
    pub resources: Option<PrefetchedResources>,
}

impl LaunchState {
    pub fn snapshot(&self) -> LaunchSnapshot {
        LaunchSnapshot {
            generation: self.generation,
            phase: self.phase,
            decision: self.decision,
        }
    }

    /// Start a fresh generation, overwriting the phase.
    pub fn begin_generation(&mut self, phase: LaunchPhase) -> PrefetchGeneration {
        self.generation = self.generation.next();
        self.phase = phase;
        self.decision = OnboardingDecision::None;
        self.resources = None;
        self.generation
    }

    /// Move forward within the current generation.
    pub fn advance(&mut self, next: LaunchPhase) -> Result<(), LaunchError> {
        if !self.phase.can_advance_to(next) {
            return Err(LaunchError::PhaseRegression {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }
}

/// Launch context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: serializes every state-mutating operation, including
///   the emission of the resulting snapshot, so snapshots reach the UI in
///   mutation order.
/// - `state`: used for both reading and writing.
#[derive(Default)]
pub struct LaunchContext {
    state: Mutex<LaunchState>,
    dispatch_lock: Mutex<()>,
}

impl LaunchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lightweight read that does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> LaunchState {
        self.state.lock().await.clone()
    }

    pub async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Mutate state. Should only be called after acquiring `dispatch_lock`.
    pub async fn update<R>(&self, f: impl FnOnce(&mut LaunchState) -> R) -> R {
        let mut guard = self.state.lock().await;
        f(&mut *guard)
    }
}
