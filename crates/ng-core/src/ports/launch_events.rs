use async_trait::async_trait;

use crate::launch::LaunchSnapshot;
use crate::resync::ContentChanged;

/// Publishes launch state changes to the presentation layer.
#[async_trait]
pub trait LaunchStateEmitter: Send + Sync {
    async fn emit_launch_state(&self, snapshot: LaunchSnapshot) -> anyhow::Result<()>;
}

/// Fans the "content changed" refresh signal out to content consumers.
#[async_trait]
pub trait ContentChangedEmitter: Send + Sync {
    async fn emit_content_changed(&self, event: ContentChanged) -> anyhow::Result<()>;
}
