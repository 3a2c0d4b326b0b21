use async_trait::async_trait;

/// Port for priming the saved-content list cache.
///
/// Side effect only; the result is not consumed by the onboarding gate.
#[async_trait]
pub trait ContentListerPort: Send + Sync {
    async fn warm(&self) -> anyhow::Result<()>;
}
