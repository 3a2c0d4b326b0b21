pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::load_config;
pub use run::run_launch;
pub use wiring::{start_launch, wire_launch, LaunchCollaborators, LaunchHandle, WiredLaunch};
