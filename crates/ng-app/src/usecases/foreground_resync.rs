//! Foreground resync use case
//!
//! Runs every time the app becomes active. Independent of the launch phase
//! and safe to invoke repeatedly: overlapping activations are serialized and
//! a refresh signal is emitted only when pending shares were actually flushed.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use ng_core::ports::{
    AuthProviderPort, ContentChangedEmitter, NotificationRegistrarPort, PendingSharePort,
};
use ng_core::ContentChanged;

/// Outcome of one resync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResyncOutcome {
    /// Not authenticated, nothing was touched
    Skipped,
    /// Resync ran; `content_changed` is true when a refresh was broadcast
    Completed { content_changed: bool },
}

pub struct ForegroundResync {
    auth: Arc<dyn AuthProviderPort>,
    notifications: Arc<dyn NotificationRegistrarPort>,
    pending_shares: Arc<dyn PendingSharePort>,
    content_changed: Arc<dyn ContentChangedEmitter>,
    run_lock: Mutex<()>,
}

impl ForegroundResync {
    pub fn new(
        auth: Arc<dyn AuthProviderPort>,
        notifications: Arc<dyn NotificationRegistrarPort>,
        pending_shares: Arc<dyn PendingSharePort>,
        content_changed: Arc<dyn ContentChangedEmitter>,
    ) -> Self {
        Self {
            auth,
            notifications,
            pending_shares,
            content_changed,
            run_lock: Mutex::new(()),
        }
    }

    pub async fn execute(&self) -> ResyncOutcome {
        let _guard = self.run_lock.lock().await;
        let span = info_span!("usecase.foreground_resync.execute");

        async {
            if !self.auth.is_authenticated().await {
                debug!("App activated while signed out, skipping resync");
                return ResyncOutcome::Skipped;
            }

            if let Err(err) = self.notifications.reset_badge().await {
                warn!(error = %err, "Failed to reset notification badge");
            }

            let flushed = match self.pending_shares.process_pending().await {
                Ok(flushed) => flushed,
                Err(err) => {
                    warn!(error = %err, "Pending share flush failed");
                    false
                }
            };

            if !flushed {
                debug!("No pending shares flushed");
                return ResyncOutcome::Completed {
                    content_changed: false,
                };
            }

            if let Err(err) = self
                .content_changed
                .emit_content_changed(ContentChanged::now())
                .await
            {
                warn!(error = %err, "Failed to broadcast content change");
            }
            info!("Pending shares flushed, content change broadcast");

            ResyncOutcome::Completed {
                content_changed: true,
            }
        }
        .instrument(span)
        .await
    }
}
