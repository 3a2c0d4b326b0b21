//! Launch runtime event loop.
//!
//! Bridges the auth collaborator and the UI lifecycle hooks onto the launch
//! orchestrator and the foreground resync handler.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use ng_core::ports::AuthProviderPort;
use ng_core::{AuthState, LaunchSnapshot, OnboardingFlag};

use crate::usecases::{DismissOutcome, ForegroundResync, LaunchOrchestrator, ResyncOutcome};

/// Lifecycle signal sent by the UI each time the app becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppActivated;

pub struct LaunchRuntime {
    auth: Arc<dyn AuthProviderPort>,
    orchestrator: Arc<LaunchOrchestrator>,
    resync: Arc<ForegroundResync>,
}

impl LaunchRuntime {
    pub fn new(
        auth: Arc<dyn AuthProviderPort>,
        orchestrator: Arc<LaunchOrchestrator>,
        resync: Arc<ForegroundResync>,
    ) -> Self {
        Self {
            auth,
            orchestrator,
            resync,
        }
    }

    pub fn orchestrator(&self) -> &Arc<LaunchOrchestrator> {
        &self.orchestrator
    }

    pub async fn snapshot(&self) -> LaunchSnapshot {
        self.orchestrator.snapshot().await
    }

    pub async fn on_auth_changed(&self, state: AuthState) -> Option<JoinHandle<()>> {
        self.orchestrator.on_auth_changed(state).await
    }

    /// Run a foreground resync in the background.
    pub fn on_app_activated(&self) -> JoinHandle<ResyncOutcome> {
        let resync = Arc::clone(&self.resync);
        tokio::spawn(async move { resync.execute().await })
    }

    pub async fn dismiss_onboarding(&self, flag: OnboardingFlag) -> DismissOutcome {
        self.orchestrator.dismiss_onboarding(flag).await
    }

    /// Seed the orchestrator with the current auth status, then forward
    /// every auth change and activation until both sources close.
    pub async fn run(
        self: Arc<Self>,
        mut activations: mpsc::Receiver<AppActivated>,
    ) -> anyhow::Result<()> {
        let mut auth_changes = self.auth.subscribe().await?;

        let initial = AuthState::from_authenticated(self.auth.is_authenticated().await);
        info!(state = ?initial, "Launch runtime started");
        self.on_auth_changed(initial).await;

        let mut auth_open = true;
        let mut activations_open = true;

        while auth_open || activations_open {
            tokio::select! {
                change = auth_changes.recv(), if auth_open => match change {
                    Some(state) => {
                        debug!(state = ?state, "Auth state changed");
                        self.on_auth_changed(state).await;
                    }
                    None => {
                        warn!("Auth subscription closed");
                        auth_open = false;
                    }
                },
                activation = activations.recv(), if activations_open => match activation {
                    Some(AppActivated) => {
                        let resync = self.on_app_activated();
                        tokio::spawn(async move {
                            match resync.await {
                                Ok(outcome) => debug!(?outcome, "Foreground resync finished"),
                                Err(err) => error!(error = %err, "Foreground resync task failed"),
                            }
                        });
                    }
                    None => {
                        debug!("Activation channel closed");
                        activations_open = false;
                    }
                },
            }
        }

        info!("Launch runtime stopped");
        Ok(())
    }
}
