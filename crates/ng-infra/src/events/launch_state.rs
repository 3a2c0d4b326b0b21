use async_trait::async_trait;
use tokio::sync::watch;

use ng_core::ports::LaunchStateEmitter;
use ng_core::LaunchSnapshot;

/// Publishes the latest launch snapshot on a `watch` channel.
///
/// Late subscribers observe the current snapshot immediately; intermediate
/// snapshots may be skipped by slow readers, which is fine for rendering.
pub struct WatchLaunchStateEmitter {
    tx: watch::Sender<LaunchSnapshot>,
}

impl WatchLaunchStateEmitter {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(LaunchSnapshot::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<LaunchSnapshot> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> LaunchSnapshot {
        self.tx.borrow().clone()
    }
}

impl Default for WatchLaunchStateEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LaunchStateEmitter for WatchLaunchStateEmitter {
    async fn emit_launch_state(&self, snapshot: LaunchSnapshot) -> anyhow::Result<()> {
        // send_replace keeps the value even while nobody is subscribed
        self.tx.send_replace(snapshot);
        Ok(())
    }
}
