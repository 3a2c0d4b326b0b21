//! Onboarding use cases
//!
//! Reading flags for the gate and persisting a dismissal. Persistence
//! failures never surface: a failed read degrades to default flags and a
//! failed write is logged without retry.

pub mod evaluate;
pub mod mark_seen;

pub use evaluate::EvaluateOnboarding;
pub use mark_seen::MarkOnboardingSeen;
