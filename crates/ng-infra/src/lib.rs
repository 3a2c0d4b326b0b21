//! # ng-infra
//!
//! Infrastructure adapters for the launch flow: the file-backed onboarding
//! flag store, channel-backed emitters and platform data directories.

pub mod events;
pub mod fs;
pub mod onboarding_flags;

pub use events::{BroadcastContentChangedEmitter, WatchLaunchStateEmitter};
pub use onboarding_flags::FilePersistedFlagStore;
