//! # Dependency Injection
//!
//! Builds the infrastructure adapters, injects them together with the
//! externally supplied collaborators into the launch use cases, and hands
//! the assembled runtime back to the caller.
//!
//! This module assembles; it does not decide. Launch behavior lives in
//! `ng-app`.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

use ng_app::usecases::{
    EvaluateOnboarding, ForegroundResync, LaunchOrchestrator, LaunchOrchestratorDeps,
    LaunchPrefetchSources, MarkOnboardingSeen, PrefetchCoordinator, RegisterNotifications,
};
use ng_app::{AppActivated, LaunchRuntime};
use ng_core::ports::{
    AuthProviderPort, ContentListerPort, NotificationRegistrarPort, PendingSharePort,
    PersistedFlagStorePort, PreferencesPort,
};
use ng_core::{ContentChanged, LaunchConfig, LaunchSnapshot};
use ng_infra::fs::resolve_data_dir;
use ng_infra::{BroadcastContentChangedEmitter, FilePersistedFlagStore, WatchLaunchStateEmitter};

use crate::adapters::{LoggingContentChangedEmitter, LoggingLaunchStateEmitter};

const ACTIVATION_CHANNEL_CAPACITY: usize = 16;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Data directory resolution failed: {0}")]
    DataDir(String),

    #[error("Data directory creation failed: {0}")]
    DataDirCreate(String),
}

/// Collaborators owned by the embedding application.
pub struct LaunchCollaborators {
    pub auth: Arc<dyn AuthProviderPort>,
    pub preferences: Arc<dyn PreferencesPort>,
    pub content: Arc<dyn ContentListerPort>,
    pub pending_shares: Arc<dyn PendingSharePort>,
    pub notifications: Arc<dyn NotificationRegistrarPort>,
}

/// Assembled launch flow, not yet running.
pub struct WiredLaunch {
    pub runtime: Arc<LaunchRuntime>,
    pub launch_state: Arc<WatchLaunchStateEmitter>,
    pub content_changed: Arc<BroadcastContentChangedEmitter>,
    pub flag_store: Arc<FilePersistedFlagStore>,
    pub data_dir: PathBuf,
}

/// Running launch flow.
pub struct LaunchHandle {
    pub runtime: Arc<LaunchRuntime>,
    pub launch_state: watch::Receiver<LaunchSnapshot>,
    pub content_changed: Arc<BroadcastContentChangedEmitter>,
    pub activations: mpsc::Sender<AppActivated>,
    pub task: JoinHandle<anyhow::Result<()>>,
}

impl LaunchHandle {
    /// Subscribe another content consumer to refresh signals.
    pub fn subscribe_content_changed(&self) -> broadcast::Receiver<ContentChanged> {
        self.content_changed.subscribe()
    }
}

/// Wire the launch flow from configuration and collaborators.
pub fn wire_launch(
    config: &LaunchConfig,
    collaborators: LaunchCollaborators,
) -> WiringResult<WiredLaunch> {
    let data_dir =
        resolve_data_dir(&config.data_dir).map_err(|e| WiringError::DataDir(e.to_string()))?;
    std::fs::create_dir_all(&data_dir).map_err(|e| {
        WiringError::DataDirCreate(format!("{}: {}", data_dir.display(), e))
    })?;

    let flag_store = Arc::new(FilePersistedFlagStore::with_defaults(data_dir.clone()));
    let launch_state = Arc::new(WatchLaunchStateEmitter::new());
    let content_changed = Arc::new(BroadcastContentChangedEmitter::new());

    let flags: Arc<dyn PersistedFlagStorePort> = flag_store.clone();
    let notifications = config
        .register_notifications_on_launch
        .then(|| Arc::new(RegisterNotifications::new(collaborators.notifications.clone())));

    let orchestrator = Arc::new(LaunchOrchestrator::from_deps(LaunchOrchestratorDeps {
        coordinator: PrefetchCoordinator::new(config.prefetch_task_timeout()),
        sources: LaunchPrefetchSources {
            preferences: collaborators.preferences,
            content: collaborators.content,
            notifications,
        },
        evaluate_onboarding: Arc::new(EvaluateOnboarding::new(flags.clone())),
        mark_seen: Arc::new(MarkOnboardingSeen::new(flags)),
        state_emitter: Arc::new(LoggingLaunchStateEmitter::new(launch_state.clone())),
        chain_delay: config.onboarding_chain_delay(),
    }));

    let resync = Arc::new(ForegroundResync::new(
        collaborators.auth.clone(),
        collaborators.notifications,
        collaborators.pending_shares,
        Arc::new(LoggingContentChangedEmitter::new(content_changed.clone())),
    ));

    let runtime = Arc::new(LaunchRuntime::new(collaborators.auth, orchestrator, resync));

    info!(
        data_dir = %data_dir.display(),
        task_timeout_ms = config.prefetch_task_timeout_ms,
        chain_delay_ms = config.onboarding_chain_delay_ms,
        register_notifications = config.register_notifications_on_launch,
        "Launch flow wired"
    );

    Ok(WiredLaunch {
        runtime,
        launch_state,
        content_changed,
        flag_store,
        data_dir,
    })
}

impl WiredLaunch {
    /// Spawn the runtime event loop. Must be called within a tokio runtime.
    pub fn start(self) -> LaunchHandle {
        let (activations, activation_rx) = mpsc::channel(ACTIVATION_CHANNEL_CAPACITY);
        let launch_state = self.launch_state.subscribe();
        let task = tokio::spawn(Arc::clone(&self.runtime).run(activation_rx));

        LaunchHandle {
            runtime: self.runtime,
            launch_state,
            content_changed: self.content_changed,
            activations,
            task,
        }
    }
}

/// Wire and immediately start the launch flow.
pub fn start_launch(
    config: &LaunchConfig,
    collaborators: LaunchCollaborators,
) -> WiringResult<LaunchHandle> {
    Ok(wire_launch(config, collaborators)?.start())
}
