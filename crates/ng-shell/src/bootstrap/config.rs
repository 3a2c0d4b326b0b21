//! # Configuration Loader
//!
//! Reads the TOML configuration file and maps it onto [`LaunchConfig`].
//! Keys absent from the file take the values of [`LaunchConfig::default`],
//! so a partial file behaves like no file for everything it leaves out.

use anyhow::Context;
use std::path::Path;

use ng_core::LaunchConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<LaunchConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let mut toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    fill_missing(&mut toml_value, default_values());
    LaunchConfig::from_toml(&toml_value)
}

/// [`LaunchConfig::default`] in the file layout. `data_dir` is left out:
/// an empty value is resolved to the platform directory at wiring time.
fn default_values() -> toml::Value {
    let defaults = LaunchConfig::default();

    let mut prefetch = toml::Table::new();
    prefetch.insert(
        "task_timeout_ms".to_string(),
        toml::Value::Integer(i64::try_from(defaults.prefetch_task_timeout_ms).unwrap_or(i64::MAX)),
    );
    let mut onboarding = toml::Table::new();
    onboarding.insert(
        "chain_delay_ms".to_string(),
        toml::Value::Integer(
            i64::try_from(defaults.onboarding_chain_delay_ms).unwrap_or(i64::MAX),
        ),
    );
    let mut notifications = toml::Table::new();
    notifications.insert(
        "register_on_launch".to_string(),
        toml::Value::Boolean(defaults.register_notifications_on_launch),
    );

    let mut root = toml::Table::new();
    root.insert("prefetch".to_string(), toml::Value::Table(prefetch));
    root.insert("onboarding".to_string(), toml::Value::Table(onboarding));
    root.insert("notifications".to_string(), toml::Value::Table(notifications));
    toml::Value::Table(root)
}

/// Copy every key of `defaults` that `target` does not set. Values present
/// in `target` always win, even when their type is unexpected.
fn fill_missing(target: &mut toml::Value, defaults: toml::Value) {
    let (toml::Value::Table(target), toml::Value::Table(defaults)) = (target, defaults) else {
        return;
    };
    for (key, default) in defaults {
        match target.get_mut(&key) {
            Some(existing) => fill_missing(existing, default),
            None => {
                target.insert(key, default);
            }
        }
    }
}
