use async_trait::async_trait;

/// Port for flushing content queued by the share extension while the app
/// was in the background.
#[async_trait]
pub trait PendingSharePort: Send + Sync {
    /// Process queued shares.
    ///
    /// Returns `true` only if something was actually flushed.
    async fn process_pending(&self) -> anyhow::Result<bool>;
}
