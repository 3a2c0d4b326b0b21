use serde::{Deserialize, Serialize};

/// Monotonically increasing token identifying one prefetch run.
///
/// Results tagged with a generation other than the current one are stale
/// and must be discarded without touching shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct PrefetchGeneration(u64);

impl PrefetchGeneration {
    /// The generation in effect before any auth transition.
    pub const INITIAL: PrefetchGeneration = PrefetchGeneration(0);

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PrefetchGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.0)
    }
}
