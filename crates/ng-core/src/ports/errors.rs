use thiserror::Error;

use crate::prefetch::PrefetchErrorKind;

/// Typed failure a collaborator can attach to its `anyhow::Error` so the
/// launch flow can classify it.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("network request failed: {0}")]
    Network(String),

    #[error("storage access failed: {0}")]
    Storage(String),

    #[error("not authorized")]
    Unauthorized,

    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

impl CollaboratorError {
    pub fn kind(&self) -> PrefetchErrorKind {
        match self {
            CollaboratorError::Network(_) => PrefetchErrorKind::Network,
            CollaboratorError::Storage(_) => PrefetchErrorKind::Storage,
            CollaboratorError::Unauthorized => PrefetchErrorKind::Unauthorized,
            CollaboratorError::PermissionDenied(_) => PrefetchErrorKind::PermissionDenied,
        }
    }

    /// Classify an arbitrary error by looking for a `CollaboratorError`
    /// anywhere in its source chain.
    pub fn classify(err: &anyhow::Error) -> PrefetchErrorKind {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<CollaboratorError>())
            .map(CollaboratorError::kind)
            .unwrap_or(PrefetchErrorKind::Other)
    }
}
