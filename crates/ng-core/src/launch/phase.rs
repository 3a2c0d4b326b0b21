use serde::{Deserialize, Serialize};

/// Launch phase exposed to the presentation layer.
///
/// Within one generation the phase only moves forward:
/// `Prefetching -> OnboardingEval -> Ready`. `AwaitingAuth` is the state
/// before the first auth event and `Login` is held until the user
/// authenticates again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchPhase {
    #[default]
    AwaitingAuth,
    Login,
    Prefetching,
    OnboardingEval,
    Ready,
}

impl LaunchPhase {
    fn rank(self) -> u8 {
        match self {
            LaunchPhase::AwaitingAuth | LaunchPhase::Login => 0,
            LaunchPhase::Prefetching => 1,
            LaunchPhase::OnboardingEval => 2,
            LaunchPhase::Ready => 3,
        }
    }

    /// Whether moving to `next` keeps the phase monotonic within a generation.
    pub fn can_advance_to(self, next: LaunchPhase) -> bool {
        next.rank() > self.rank()
    }

    pub fn is_ready(self) -> bool {
        matches!(self, LaunchPhase::Ready)
    }
}
