//! Nugget Launch Orchestration Layer
//!
//! This crate contains the launch use cases: concurrent prefetch, the launch
//! state machine, onboarding evaluation and the foreground resync path.

pub mod runtime;
pub mod usecases;

pub use runtime::{AppActivated, LaunchRuntime};
