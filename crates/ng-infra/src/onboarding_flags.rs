//! File-based onboarding flag store
//!
//! Persists the onboarding flags as a small JSON document in the application
//! data directory.

use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use ng_core::ports::PersistedFlagStorePort;
use ng_core::{OnboardingFlag, PersistedFlags};

pub const DEFAULT_ONBOARDING_FLAGS_FILE: &str = ".onboarding_flags";

pub struct FilePersistedFlagStore {
    flags_file_path: PathBuf,
    // Serializes read-modify-write cycles in `mark_seen`.
    write_lock: Mutex<()>,
}

impl FilePersistedFlagStore {
    /// Create store with custom file path
    pub fn new(flags_file_path: PathBuf) -> Self {
        Self {
            flags_file_path,
            write_lock: Mutex::new(()),
        }
    }

    /// Create store with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_ONBOARDING_FLAGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.flags_file_path
    }

    /// Overwrite all flags, e.g. when the account becomes eligible for the
    /// beta welcome.
    pub async fn set_flags(&self, flags: &PersistedFlags) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_flags(flags).await
    }

    async fn read_flags(&self) -> anyhow::Result<PersistedFlags> {
        if !fs::try_exists(&self.flags_file_path).await? {
            return Ok(PersistedFlags::default());
        }

        let content = fs::read_to_string(&self.flags_file_path).await?;
        if content.trim().is_empty() {
            return Ok(PersistedFlags::default());
        }

        serde_json::from_str(&content).context("Failed to parse onboarding flags")
    }

    async fn write_flags(&self, flags: &PersistedFlags) -> anyhow::Result<()> {
        if let Some(parent) = self.flags_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(flags)
            .map_err(|e| anyhow::anyhow!("Failed to serialize onboarding flags: {}", e))?;

        let mut file = fs::File::create(&self.flags_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create flags file: {}", e))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write flags file: {}", e))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync flags file: {}", e))?;

        Ok(())
    }
}

#[async_trait]
impl PersistedFlagStorePort for FilePersistedFlagStore {
    async fn get_flags(&self) -> anyhow::Result<PersistedFlags> {
        self.read_flags().await
    }

    async fn mark_seen(&self, flag: OnboardingFlag) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;

        // A corrupt file reads as absent flags; overwrite it from defaults.
        let mut flags = match self.read_flags().await {
            Ok(flags) => flags,
            Err(err) if err.downcast_ref::<serde_json::Error>().is_some() => {
                warn!(
                    path = %self.flags_file_path.display(),
                    error = %err,
                    "onboarding flags file is corrupt, rewriting from defaults"
                );
                PersistedFlags::default()
            }
            Err(err) => return Err(err),
        };
        if flags.is_seen(flag) {
            debug!(?flag, "onboarding flag already seen");
            return Ok(());
        }
        flags.mark_seen(flag);
        self.write_flags(&flags).await
    }
}
