//! Launch domain module.
//!
//! Defines the launch phase progression, generation tokens and the
//! observable snapshot pushed to the presentation layer.

mod generation;
mod phase;
mod snapshot;

pub use generation::PrefetchGeneration;
pub use phase::LaunchPhase;
pub use snapshot::LaunchSnapshot;

/// Launch state errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    #[error("launch phase cannot move from {from:?} to {to:?}")]
    PhaseRegression { from: LaunchPhase, to: LaunchPhase },
}
