//! Port interfaces for the launch flow
//!
//! Ports define the contract between the launch use cases and the
//! collaborators implemented by the surrounding application: auth, remote
//! preferences, content warming, pending shares, notifications, flag
//! persistence and the UI-facing emitters.
//!
//! Every port is injected as `Arc<dyn Port>` so tests can substitute fakes.

pub mod auth;
pub mod content;
pub mod errors;
pub mod flags;
pub mod launch_events;
pub mod notifications;
pub mod pending_share;
pub mod preferences;

pub use auth::AuthProviderPort;
pub use content::ContentListerPort;
pub use errors::CollaboratorError;
pub use flags::PersistedFlagStorePort;
pub use launch_events::{ContentChangedEmitter, LaunchStateEmitter};
pub use notifications::NotificationRegistrarPort;
pub use pending_share::PendingSharePort;
pub use preferences::PreferencesPort;
