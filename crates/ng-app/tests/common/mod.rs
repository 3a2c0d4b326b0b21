#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use ng_app::usecases::{
    EvaluateOnboarding, ForegroundResync, LaunchOrchestrator, LaunchOrchestratorDeps,
    LaunchPrefetchSources, MarkOnboardingSeen, PrefetchCoordinator, RegisterNotifications,
};
use ng_core::ports::{
    AuthProviderPort, CollaboratorError, ContentChangedEmitter, ContentListerPort,
    LaunchStateEmitter, NotificationRegistrarPort, PendingSharePort, PersistedFlagStorePort,
    PreferencesPort,
};
use ng_core::{
    AuthState, ContentChanged, LaunchPhase, LaunchSnapshot, OnboardingFlag, PersistedFlags,
    Preferences,
};

static TRACE_INIT: Once = Once::new();

pub fn init_tracing() {
    TRACE_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ---------------------------------------------------------------------------
// Emitters
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingLaunchEmitter {
    snapshots: Mutex<Vec<LaunchSnapshot>>,
}

impl RecordingLaunchEmitter {
    pub fn snapshots(&self) -> Vec<LaunchSnapshot> {
        self.snapshots.lock().unwrap().clone()
    }

    pub fn phases(&self) -> Vec<LaunchPhase> {
        self.snapshots().into_iter().map(|s| s.phase).collect()
    }

    pub fn ready_count(&self) -> usize {
        self.phases()
            .into_iter()
            .filter(|phase| *phase == LaunchPhase::Ready)
            .count()
    }
}

#[async_trait]
impl LaunchStateEmitter for RecordingLaunchEmitter {
    async fn emit_launch_state(&self, snapshot: LaunchSnapshot) -> anyhow::Result<()> {
        self.snapshots.lock().unwrap().push(snapshot);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingContentChanged {
    events: Mutex<Vec<ContentChanged>>,
}

impl RecordingContentChanged {
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentChangedEmitter for RecordingContentChanged {
    async fn emit_content_changed(&self, event: ContentChanged) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Prefetch collaborators
// ---------------------------------------------------------------------------

pub struct ScriptedPreferences {
    preferences: Preferences,
    fail: bool,
    calls: AtomicUsize,
}

impl ScriptedPreferences {
    pub fn ok(preferences: Preferences) -> Self {
        Self {
            preferences,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            preferences: Preferences::default(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PreferencesPort for ScriptedPreferences {
    async fn get(&self) -> anyhow::Result<Preferences> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CollaboratorError::Network("preferences service unreachable".into()).into());
        }
        Ok(self.preferences.clone())
    }
}

/// Preferences fetch that blocks until the test releases it.
#[derive(Default)]
pub struct GatedPreferences {
    pending: Mutex<Vec<oneshot::Sender<anyhow::Result<Preferences>>>>,
}

impl GatedPreferences {
    pub fn pending(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    /// Complete the `index`-th call made so far.
    pub fn release(&self, index: usize, result: anyhow::Result<Preferences>) {
        let mut pending = self.pending.lock().unwrap();
        let (tx, _) = oneshot::channel();
        let sender = std::mem::replace(&mut pending[index], tx);
        let _ = sender.send(result);
    }

    pub async fn wait_for_calls(&self, expected: usize) {
        while self.pending() < expected {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl PreferencesPort for GatedPreferences {
    async fn get(&self) -> anyhow::Result<Preferences> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push(tx);
        rx.await
            .map_err(|_| anyhow::anyhow!("preferences request abandoned"))?
    }
}

pub struct ScriptedContent {
    fail: bool,
    calls: AtomicUsize,
}

impl ScriptedContent {
    pub fn ok() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentListerPort for ScriptedContent {
    async fn warm(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CollaboratorError::Storage("content cache unreadable".into()).into());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Notifications and pending shares
// ---------------------------------------------------------------------------

pub struct FakeRegistrar {
    granted: bool,
    fail_register: bool,
    registrations: AtomicUsize,
    badge_resets: AtomicUsize,
}

impl FakeRegistrar {
    pub fn granting() -> Self {
        Self::new(true, false)
    }

    pub fn denying() -> Self {
        Self::new(false, false)
    }

    pub fn failing_registration() -> Self {
        Self::new(true, true)
    }

    fn new(granted: bool, fail_register: bool) -> Self {
        Self {
            granted,
            fail_register,
            registrations: AtomicUsize::new(0),
            badge_resets: AtomicUsize::new(0),
        }
    }

    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    pub fn badge_resets(&self) -> usize {
        self.badge_resets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationRegistrarPort for FakeRegistrar {
    async fn request_authorization(&self) -> anyhow::Result<bool> {
        Ok(self.granted)
    }

    async fn register(&self) -> anyhow::Result<()> {
        if self.fail_register {
            return Err(CollaboratorError::Network("push service unreachable".into()).into());
        }
        self.registrations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn reset_badge(&self) -> anyhow::Result<()> {
        self.badge_resets.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Pending share queue: `process_pending` flushes whatever was queued.
#[derive(Default)]
pub struct FakePendingShares {
    queued: AtomicUsize,
    fail: AtomicBool,
    runs: AtomicUsize,
}

impl FakePendingShares {
    pub fn enqueue(&self, count: usize) {
        self.queued.fetch_add(count, Ordering::SeqCst);
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    pub fn queued(&self) -> usize {
        self.queued.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PendingSharePort for FakePendingShares {
    async fn process_pending(&self) -> anyhow::Result<bool> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Storage("share container locked".into()).into());
        }
        Ok(self.queued.swap(0, Ordering::SeqCst) > 0)
    }
}

// ---------------------------------------------------------------------------
// Flags and auth
// ---------------------------------------------------------------------------

pub struct MemoryFlagStore {
    flags: Mutex<PersistedFlags>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: Mutex<Vec<OnboardingFlag>>,
}

impl MemoryFlagStore {
    pub fn new(flags: PersistedFlags) -> Self {
        Self {
            flags: Mutex::new(flags),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn flags(&self) -> PersistedFlags {
        *self.flags.lock().unwrap()
    }

    pub fn writes(&self) -> Vec<OnboardingFlag> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl PersistedFlagStorePort for MemoryFlagStore {
    async fn get_flags(&self) -> anyhow::Result<PersistedFlags> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Storage("flag store unreadable".into()).into());
        }
        Ok(*self.flags.lock().unwrap())
    }

    async fn mark_seen(&self, flag: OnboardingFlag) -> anyhow::Result<()> {
        self.writes.lock().unwrap().push(flag);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Storage("flag store read-only".into()).into());
        }
        self.flags.lock().unwrap().mark_seen(flag);
        Ok(())
    }
}

pub struct FakeAuth {
    authenticated: AtomicBool,
    receiver: Mutex<Option<mpsc::Receiver<AuthState>>>,
    sender: mpsc::Sender<AuthState>,
}

impl FakeAuth {
    pub fn new(authenticated: bool) -> Self {
        let (sender, receiver) = mpsc::channel(16);
        Self {
            authenticated: AtomicBool::new(authenticated),
            receiver: Mutex::new(Some(receiver)),
            sender,
        }
    }

    pub fn set_authenticated(&self, authenticated: bool) {
        self.authenticated.store(authenticated, Ordering::SeqCst);
    }

    /// Update the status and deliver the change to the subscriber.
    pub async fn change(&self, state: AuthState) {
        self.set_authenticated(state.is_authenticated());
        let _ = self.sender.send(state).await;
    }
}

#[async_trait]
impl AuthProviderPort for FakeAuth {
    async fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<AuthState>> {
        self.receiver
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| anyhow::anyhow!("auth already subscribed"))
    }
}

// ---------------------------------------------------------------------------
// Construction helpers
// ---------------------------------------------------------------------------

pub fn beta_tester_flags() -> PersistedFlags {
    PersistedFlags {
        has_seen_tutorial: false,
        beta_welcome_eligible: true,
        beta_welcome_seen: false,
    }
}

pub fn onboarded_flags() -> PersistedFlags {
    PersistedFlags {
        has_seen_tutorial: true,
        beta_welcome_eligible: false,
        beta_welcome_seen: false,
    }
}

pub struct OrchestratorParts {
    pub preferences: Arc<dyn PreferencesPort>,
    pub content: Arc<dyn ContentListerPort>,
    pub registrar: Option<Arc<dyn NotificationRegistrarPort>>,
    pub flags: Arc<MemoryFlagStore>,
    pub emitter: Arc<RecordingLaunchEmitter>,
    pub chain_delay: Duration,
    pub task_timeout: Option<Duration>,
}

impl OrchestratorParts {
    pub fn new(flags: PersistedFlags) -> Self {
        Self {
            preferences: Arc::new(ScriptedPreferences::ok(Preferences::default())),
            content: Arc::new(ScriptedContent::ok()),
            registrar: None,
            flags: Arc::new(MemoryFlagStore::new(flags)),
            emitter: Arc::new(RecordingLaunchEmitter::default()),
            chain_delay: Duration::ZERO,
            task_timeout: None,
        }
    }

    pub fn build(&self) -> Arc<LaunchOrchestrator> {
        self.build_with_flag_store(self.flags.clone())
    }

    pub fn build_with_flag_store(
        &self,
        flag_store: Arc<dyn PersistedFlagStorePort>,
    ) -> Arc<LaunchOrchestrator> {
        Arc::new(LaunchOrchestrator::from_deps(LaunchOrchestratorDeps {
            coordinator: PrefetchCoordinator::new(self.task_timeout),
            sources: LaunchPrefetchSources {
                preferences: self.preferences.clone(),
                content: self.content.clone(),
                notifications: self
                    .registrar
                    .clone()
                    .map(|registrar| Arc::new(RegisterNotifications::new(registrar))),
            },
            evaluate_onboarding: Arc::new(EvaluateOnboarding::new(flag_store.clone())),
            mark_seen: Arc::new(MarkOnboardingSeen::new(flag_store)),
            state_emitter: self.emitter.clone(),
            chain_delay: self.chain_delay,
        }))
    }
}

pub struct ResyncParts {
    pub auth: Arc<FakeAuth>,
    pub registrar: Arc<FakeRegistrar>,
    pub shares: Arc<FakePendingShares>,
    pub content_changed: Arc<RecordingContentChanged>,
}

impl ResyncParts {
    pub fn new(authenticated: bool) -> Self {
        Self {
            auth: Arc::new(FakeAuth::new(authenticated)),
            registrar: Arc::new(FakeRegistrar::granting()),
            shares: Arc::new(FakePendingShares::default()),
            content_changed: Arc::new(RecordingContentChanged::default()),
        }
    }

    pub fn build(&self) -> Arc<ForegroundResync> {
        Arc::new(ForegroundResync::new(
            self.auth.clone(),
            self.registrar.clone(),
            self.shares.clone(),
            self.content_changed.clone(),
        ))
    }
}

/// Drive the orchestrator through an authenticated launch and wait for the
/// prefetch batch to be applied.
pub async fn launch_authenticated(orchestrator: &Arc<LaunchOrchestrator>) {
    let handle = orchestrator
        .on_auth_changed(AuthState::Authenticated)
        .await
        .expect("authenticated launch spawns a prefetch batch");
    handle.await.expect("prefetch task panicked");
}
