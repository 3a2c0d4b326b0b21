use std::path::Path;

use anyhow::Context;
use tracing::info;

use ng_core::LaunchConfig;
use ng_infra::fs::resolve_data_dir;

use super::config::load_config;
use super::tracing::init_tracing_subscriber;
use super::wiring::{start_launch, LaunchCollaborators, LaunchHandle};

/// Full bootstrap: configuration, tracing, wiring and runtime start.
///
/// Without a config file the built-in defaults apply. Logs go to
/// `<data_dir>/logs`. Must be called within a tokio runtime and at most once
/// per process.
pub fn run_launch(
    config_path: Option<&Path>,
    collaborators: LaunchCollaborators,
) -> anyhow::Result<LaunchHandle> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => LaunchConfig::default(),
    };

    let log_dir = resolve_data_dir(&config.data_dir)
        .map(|dir| dir.join("logs"))
        .ok();
    init_tracing_subscriber(log_dir.as_deref()).context("Failed to initialize tracing")?;

    info!(config = ?config, "Starting launch flow");
    start_launch(&config, collaborators).context("Failed to wire launch flow")
}
