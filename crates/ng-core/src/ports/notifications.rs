use async_trait::async_trait;

/// Port onto the platform notification service.
#[async_trait]
pub trait NotificationRegistrarPort: Send + Sync {
    /// Ask the user for notification permission.
    ///
    /// Returns `false` when the user refused.
    async fn request_authorization(&self) -> anyhow::Result<bool>;

    /// Register this device identity for remote notifications.
    async fn register(&self) -> anyhow::Result<()>;

    /// Reset the application badge counter to zero.
    ///
    /// Should be idempotent.
    async fn reset_badge(&self) -> anyhow::Result<()>;
}
