//! Logging decorators for the launch emitters.
//!
//! Every snapshot and refresh signal leaving the launch flow is traced before
//! it is handed to the channel-backed emitter the UI subscribes to.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use ng_core::ports::{ContentChangedEmitter, LaunchStateEmitter};
use ng_core::{ContentChanged, LaunchSnapshot};

// ---------------------------------------------------------------------------
// LoggingLaunchStateEmitter
// ---------------------------------------------------------------------------

pub struct LoggingLaunchStateEmitter {
    inner: Arc<dyn LaunchStateEmitter>,
}

impl LoggingLaunchStateEmitter {
    pub fn new(inner: Arc<dyn LaunchStateEmitter>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LaunchStateEmitter for LoggingLaunchStateEmitter {
    async fn emit_launch_state(&self, snapshot: LaunchSnapshot) -> Result<()> {
        tracing::info!(
            generation = %snapshot.generation,
            phase = ?snapshot.phase,
            decision = ?snapshot.decision,
            "Launch state"
        );
        self.inner.emit_launch_state(snapshot).await
    }
}

// ---------------------------------------------------------------------------
// LoggingContentChangedEmitter
// ---------------------------------------------------------------------------

pub struct LoggingContentChangedEmitter {
    inner: Arc<dyn ContentChangedEmitter>,
}

impl LoggingContentChangedEmitter {
    pub fn new(inner: Arc<dyn ContentChangedEmitter>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ContentChangedEmitter for LoggingContentChangedEmitter {
    async fn emit_content_changed(&self, event: ContentChanged) -> Result<()> {
        tracing::info!(at = %event.at, "Content changed");
        self.inner.emit_content_changed(event).await
    }
}
