use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::auth::AuthState;

/// Port onto the external authentication collaborator.
#[async_trait]
pub trait AuthProviderPort: Send + Sync {
    /// Current authentication status.
    async fn is_authenticated(&self) -> bool;

    /// Subscribe to auth state changes.
    ///
    /// Every transition reported by the collaborator is delivered in order.
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<AuthState>>;
}
