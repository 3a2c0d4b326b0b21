use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "Nugget";

/// Get the Nugget application data root directory.
///
/// # Platform-specific Paths
/// - macOS: ~/Library/Application Support/Nugget
/// - Windows: %APPDATA%\Nugget
/// - Linux: $XDG_DATA_HOME/Nugget or ~/.local/share/Nugget
///
/// This function does not create the directory.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(APP_DIR_NAME))
}

/// Use `configured` unless it is empty, in which case fall back to
/// [`app_data_dir`].
pub fn resolve_data_dir(configured: &Path) -> Result<PathBuf> {
    if configured.as_os_str().is_empty() {
        return app_data_dir();
    }
    Ok(configured.to_path_buf())
}

fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        // XDG_DATA_HOME wins over ~/.local/share
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get platform data directory"))
}
