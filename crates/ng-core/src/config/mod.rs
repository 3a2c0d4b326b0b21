//! # Launch configuration DTO
//!
//! Pure data mapped from the TOML configuration file. No validation happens
//! here: missing keys map to empty/zero values, and the bootstrap layer
//! decides how to resolve them.

use std::path::PathBuf;
use std::time::Duration;

/// Launch configuration (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Per-task prefetch timeout in milliseconds; 0 disables the timeout
    pub prefetch_task_timeout_ms: u64,

    /// Delay before a chained onboarding screen is presented after a dismissal
    pub onboarding_chain_delay_ms: u64,

    /// Whether notification registration runs as part of the launch prefetch
    pub register_notifications_on_launch: bool,

    /// Data directory for persisted flags (may be empty - resolved at bootstrap)
    pub data_dir: PathBuf,
}

impl LaunchConfig {
    /// Create LaunchConfig from TOML value.
    ///
    /// Must NOT contain validation or default value logic.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            prefetch_task_timeout_ms: toml_value
                .get("prefetch")
                .and_then(|p| p.get("task_timeout_ms"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            onboarding_chain_delay_ms: toml_value
                .get("onboarding")
                .and_then(|o| o.get("chain_delay_ms"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            register_notifications_on_launch: toml_value
                .get("notifications")
                .and_then(|n| n.get("register_on_launch"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            data_dir: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("data_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
        })
    }

    /// Per-task timeout, `None` when disabled.
    pub fn prefetch_task_timeout(&self) -> Option<Duration> {
        (self.prefetch_task_timeout_ms > 0)
            .then(|| Duration::from_millis(self.prefetch_task_timeout_ms))
    }

    pub fn onboarding_chain_delay(&self) -> Duration {
        Duration::from_millis(self.onboarding_chain_delay_ms)
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            prefetch_task_timeout_ms: 0,
            onboarding_chain_delay_ms: 350,
            register_notifications_on_launch: true,
            data_dir: PathBuf::new(),
        }
    }
}
