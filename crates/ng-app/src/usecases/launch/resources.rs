//! Launch prefetch targets and their fallback-substituted aggregate.

use std::sync::Arc;

use serde::Serialize;

use ng_core::ports::{ContentListerPort, PreferencesPort};
use ng_core::{PrefetchBatch, PrefetchErrorKind, Preferences};

use crate::usecases::notifications::RegisterNotifications;
use crate::usecases::prefetch::PrefetchTask;

pub const PREFERENCES_TASK: &str = "preferences";
pub const CONTENT_TASK: &str = "content_list";
pub const NOTIFICATIONS_TASK: &str = "notifications";

/// Value produced by one launch prefetch task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchResource {
    Preferences(Preferences),
    ContentWarmed(bool),
    NotificationsEnabled(bool),
}

/// Fallback-substituted launch resources of one generation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PrefetchedResources {
    pub preferences: Preferences,
    pub content_warmed: bool,
    pub notifications_enabled: bool,
    /// Tasks that fell back, in submission order
    pub failed_tasks: Vec<(String, PrefetchErrorKind)>,
}

impl PrefetchedResources {
    pub fn from_batch(batch: PrefetchBatch<LaunchResource>) -> Self {
        let mut resources = PrefetchedResources {
            failed_tasks: batch.failures(),
            ..Default::default()
        };

        for entry in batch.into_entries() {
            match entry.result.into_value() {
                LaunchResource::Preferences(preferences) => resources.preferences = preferences,
                LaunchResource::ContentWarmed(warmed) => resources.content_warmed = warmed,
                LaunchResource::NotificationsEnabled(enabled) => {
                    resources.notifications_enabled = enabled
                }
            }
        }

        resources
    }
}

/// Collaborators warmed on every authenticated launch.
#[derive(Clone)]
pub struct LaunchPrefetchSources {
    pub preferences: Arc<dyn PreferencesPort>,
    pub content: Arc<dyn ContentListerPort>,
    /// `None` disables notification registration during launch
    pub notifications: Option<Arc<RegisterNotifications>>,
}

impl LaunchPrefetchSources {
    /// Build the task list for one generation.
    pub fn tasks(&self) -> Vec<PrefetchTask<LaunchResource>> {
        let mut tasks = Vec::with_capacity(3);

        let preferences = Arc::clone(&self.preferences);
        tasks.push(PrefetchTask::new(
            PREFERENCES_TASK,
            LaunchResource::Preferences(Preferences::default()),
            async move { preferences.get().await.map(LaunchResource::Preferences) },
        ));

        let content = Arc::clone(&self.content);
        tasks.push(PrefetchTask::new(
            CONTENT_TASK,
            LaunchResource::ContentWarmed(false),
            async move {
                content.warm().await?;
                Ok(LaunchResource::ContentWarmed(true))
            },
        ));

        if let Some(register) = &self.notifications {
            let register = Arc::clone(register);
            tasks.push(PrefetchTask::new(
                NOTIFICATIONS_TASK,
                LaunchResource::NotificationsEnabled(false),
                async move {
                    register
                        .execute()
                        .await
                        .map(LaunchResource::NotificationsEnabled)
                },
            ));
        }

        tasks
    }
}
