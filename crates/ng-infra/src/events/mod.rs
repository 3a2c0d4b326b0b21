//! Channel-backed emitters bridging use case output to the presentation layer.

mod content_changed;
mod launch_state;

pub use content_changed::BroadcastContentChangedEmitter;
pub use launch_state::WatchLaunchStateEmitter;
