//! Prefetch outcome models.
//!
//! Every prefetch task settles into a [`PrefetchTaskResult`], never an
//! unhandled error, so aggregation over a batch is unconditional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::launch::PrefetchGeneration;

/// Classified reason a prefetch task fell back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum PrefetchErrorKind {
    #[error("network")]
    Network,
    #[error("storage")]
    Storage,
    #[error("unauthorized")]
    Unauthorized,
    #[error("permission denied")]
    PermissionDenied,
    #[error("timed out")]
    TimedOut,
    /// The task panicked or was aborted before settling
    #[error("aborted")]
    Aborted,
    #[error("other")]
    Other,
}

/// Outcome of a single prefetch task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PrefetchTaskResult<T> {
    Success { value: T },
    Failure { kind: PrefetchErrorKind, fallback: T },
}

impl<T> PrefetchTaskResult<T> {
    pub fn success(value: T) -> Self {
        PrefetchTaskResult::Success { value }
    }

    pub fn failure(kind: PrefetchErrorKind, fallback: T) -> Self {
        PrefetchTaskResult::Failure { kind, fallback }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PrefetchTaskResult::Success { .. })
    }

    pub fn failure_kind(&self) -> Option<PrefetchErrorKind> {
        match self {
            PrefetchTaskResult::Success { .. } => None,
            PrefetchTaskResult::Failure { kind, .. } => Some(*kind),
        }
    }

    /// The fetched value, or the fallback when the task failed.
    pub fn value(&self) -> &T {
        match self {
            PrefetchTaskResult::Success { value } => value,
            PrefetchTaskResult::Failure { fallback, .. } => fallback,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            PrefetchTaskResult::Success { value } => value,
            PrefetchTaskResult::Failure { fallback, .. } => fallback,
        }
    }
}

/// Named task outcome inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefetchEntry<T> {
    pub name: String,
    pub result: PrefetchTaskResult<T>,
}

/// Settled prefetch batch, tagged with the generation it was started under.
///
/// Entries keep the order of the submitted task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefetchBatch<T> {
    pub generation: PrefetchGeneration,
    pub settled_at: DateTime<Utc>,
    entries: Vec<PrefetchEntry<T>>,
}

impl<T> PrefetchBatch<T> {
    pub fn new(generation: PrefetchGeneration, entries: Vec<PrefetchEntry<T>>) -> Self {
        Self {
            generation,
            settled_at: Utc::now(),
            entries,
        }
    }

    pub fn get(&self, name: &str) -> Option<&PrefetchTaskResult<T>> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.result)
    }

    pub fn entries(&self) -> &[PrefetchEntry<T>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<PrefetchEntry<T>> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names and kinds of the tasks that fell back.
    pub fn failures(&self) -> Vec<(String, PrefetchErrorKind)> {
        self.entries
            .iter()
            .filter_map(|entry| {
                entry
                    .result
                    .failure_kind()
                    .map(|kind| (entry.name.clone(), kind))
            })
            .collect()
    }
}
