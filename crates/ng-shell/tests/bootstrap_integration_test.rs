use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::{mpsc, watch};

use ng_app::AppActivated;
use ng_core::ports::{
    AuthProviderPort, ContentListerPort, NotificationRegistrarPort, PendingSharePort,
    PersistedFlagStorePort, PreferencesPort,
};
use ng_core::{
    AuthState, LaunchConfig, LaunchPhase, LaunchSnapshot, OnboardingDecision, OnboardingFlag,
    Preferences,
};
use ng_infra::FilePersistedFlagStore;
use ng_shell::bootstrap::wire_launch;
use ng_shell::{start_launch, LaunchCollaborators};

struct TestAuth {
    authenticated: AtomicBool,
    receiver: Mutex<Option<mpsc::Receiver<AuthState>>>,
}

#[async_trait]
impl AuthProviderPort for TestAuth {
    async fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<AuthState>> {
        self.receiver
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| anyhow::anyhow!("already subscribed"))
    }
}

struct TestPreferences;

#[async_trait]
impl PreferencesPort for TestPreferences {
    async fn get(&self) -> anyhow::Result<Preferences> {
        Ok(Preferences::default())
    }
}

struct TestContent;

#[async_trait]
impl ContentListerPort for TestContent {
    async fn warm(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct TestShares {
    queued: AtomicUsize,
}

#[async_trait]
impl PendingSharePort for TestShares {
    async fn process_pending(&self) -> anyhow::Result<bool> {
        Ok(self.queued.swap(0, Ordering::SeqCst) > 0)
    }
}

#[derive(Default)]
struct TestRegistrar {
    registrations: AtomicUsize,
}

#[async_trait]
impl NotificationRegistrarPort for TestRegistrar {
    async fn request_authorization(&self) -> anyhow::Result<bool> {
        Ok(true)
    }

    async fn register(&self) -> anyhow::Result<()> {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn reset_badge(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

struct Fixture {
    _temp_dir: TempDir,
    config: LaunchConfig,
    auth_tx: mpsc::Sender<AuthState>,
    auth: Arc<TestAuth>,
    shares: Arc<TestShares>,
    registrar: Arc<TestRegistrar>,
}

impl Fixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = LaunchConfig {
            onboarding_chain_delay_ms: 0,
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        let (auth_tx, auth_rx) = mpsc::channel(8);
        Self {
            _temp_dir: temp_dir,
            config,
            auth_tx,
            auth: Arc::new(TestAuth {
                authenticated: AtomicBool::new(false),
                receiver: Mutex::new(Some(auth_rx)),
            }),
            shares: Arc::new(TestShares::default()),
            registrar: Arc::new(TestRegistrar::default()),
        }
    }

    fn collaborators(&self) -> LaunchCollaborators {
        LaunchCollaborators {
            auth: self.auth.clone(),
            preferences: Arc::new(TestPreferences),
            content: Arc::new(TestContent),
            pending_shares: self.shares.clone(),
            notifications: self.registrar.clone(),
        }
    }

    async fn sign_in(&self) {
        self.auth.authenticated.store(true, Ordering::SeqCst);
        self.auth_tx.send(AuthState::Authenticated).await.unwrap();
    }
}

async fn wait_for_phase(
    rx: &mut watch::Receiver<LaunchSnapshot>,
    phase: LaunchPhase,
) -> LaunchSnapshot {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| s.phase == phase))
        .await
        .expect("phase not reached in time")
        .expect("launch state channel closed")
        .clone()
}

#[tokio::test]
async fn wired_launch_reaches_ready_after_sign_in() {
    let fixture = Fixture::new();
    let mut handle = start_launch(&fixture.config, fixture.collaborators()).unwrap();

    wait_for_phase(&mut handle.launch_state, LaunchPhase::Login).await;
    fixture.sign_in().await;
    let ready = wait_for_phase(&mut handle.launch_state, LaunchPhase::Ready).await;

    assert_eq!(ready.decision, OnboardingDecision::Tutorial);
    assert_eq!(fixture.registrar.registrations.load(Ordering::SeqCst), 1);

    handle.task.abort();
}

#[tokio::test]
async fn dismissal_is_persisted_in_data_dir() {
    let fixture = Fixture::new();
    let mut handle = start_launch(&fixture.config, fixture.collaborators()).unwrap();
    wait_for_phase(&mut handle.launch_state, LaunchPhase::Login).await;
    fixture.sign_in().await;
    wait_for_phase(&mut handle.launch_state, LaunchPhase::Ready).await;

    handle
        .runtime
        .dismiss_onboarding(OnboardingFlag::Tutorial)
        .await;

    let store = FilePersistedFlagStore::with_defaults(fixture.config.data_dir.clone());
    assert!(store.get_flags().await.unwrap().has_seen_tutorial);

    handle.task.abort();
}

#[tokio::test]
async fn activation_broadcasts_content_change() {
    let fixture = Fixture::new();
    let mut handle = start_launch(&fixture.config, fixture.collaborators()).unwrap();
    let mut content_rx = handle.subscribe_content_changed();
    wait_for_phase(&mut handle.launch_state, LaunchPhase::Login).await;
    fixture.sign_in().await;
    wait_for_phase(&mut handle.launch_state, LaunchPhase::Ready).await;

    fixture.shares.queued.store(2, Ordering::SeqCst);
    handle.activations.send(AppActivated).await.unwrap();

    tokio::time::timeout(Duration::from_secs(5), content_rx.recv())
        .await
        .expect("content change not broadcast")
        .unwrap();
    assert_eq!(handle.runtime.snapshot().await.phase, LaunchPhase::Ready);

    handle.task.abort();
}

#[tokio::test]
async fn notifications_are_not_registered_when_disabled() {
    let mut fixture = Fixture::new();
    fixture.config.register_notifications_on_launch = false;
    let mut handle = start_launch(&fixture.config, fixture.collaborators()).unwrap();

    wait_for_phase(&mut handle.launch_state, LaunchPhase::Login).await;
    fixture.sign_in().await;
    wait_for_phase(&mut handle.launch_state, LaunchPhase::Ready).await;

    assert_eq!(fixture.registrar.registrations.load(Ordering::SeqCst), 0);
    handle.task.abort();
}

#[test]
fn wiring_creates_configured_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("nested").join("nugget");
    let fixture = Fixture::new();
    let config = LaunchConfig {
        data_dir: data_dir.clone(),
        ..Default::default()
    };

    let wired = wire_launch(&config, fixture.collaborators()).unwrap();

    assert_eq!(wired.data_dir, data_dir);
    assert!(data_dir.is_dir());
    assert_eq!(
        wired.flag_store.path(),
        data_dir.join(".onboarding_flags").as_path()
    );
}
