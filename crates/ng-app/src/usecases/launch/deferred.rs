use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

/// Cancellable delayed callbacks driven by tokio time.
///
/// Used for chained onboarding transitions. Tests drive it with
/// `tokio::time::pause` and `advance`.
#[derive(Default)]
pub struct DeferredTransitions {
    pending: Arc<Mutex<HashMap<u64, tokio::task::AbortHandle>>>,
    next_id: AtomicU64,
}

impl DeferredTransitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` after `delay` unless cancelled first.
    pub async fn schedule<F>(&self, delay: Duration, callback: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let pending = Arc::clone(&self.pending);

        // Held until the abort handle is recorded, so a callback finishing
        // early cannot leave a stale entry behind.
        let mut pending_guard = self.pending.lock().await;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            callback.await;
            pending.lock().await.remove(&id);
        });

        pending_guard.insert(id, handle.abort_handle());
        debug!(id, delay_ms = delay.as_millis() as u64, "deferred transition scheduled");
    }

    /// Cancel every transition that has not fired yet.
    pub async fn cancel_all(&self) {
        let mut pending_guard = self.pending.lock().await;
        let cancelled = pending_guard.len();
        for (_, handle) in pending_guard.drain() {
            handle.abort();
        }
        if cancelled > 0 {
            debug!(cancelled, "deferred transitions cancelled");
        }
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}
