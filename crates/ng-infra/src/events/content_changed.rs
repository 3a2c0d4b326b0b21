use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use ng_core::ports::ContentChangedEmitter;
use ng_core::ContentChanged;

const DEFAULT_CAPACITY: usize = 16;

/// Fans "content changed" signals out to every content consumer.
pub struct BroadcastContentChangedEmitter {
    tx: broadcast::Sender<ContentChanged>,
}

impl BroadcastContentChangedEmitter {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ContentChanged> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastContentChangedEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentChangedEmitter for BroadcastContentChangedEmitter {
    async fn emit_content_changed(&self, event: ContentChanged) -> anyhow::Result<()> {
        match self.tx.send(event) {
            Ok(receivers) => debug!(receivers, "content change broadcast"),
            // No consumer is mounted yet; nothing to refresh.
            Err(_) => debug!("content change dropped, no subscribers"),
        }
        Ok(())
    }
}
