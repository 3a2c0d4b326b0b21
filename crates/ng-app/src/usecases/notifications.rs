//! Use case for registering remote notifications during launch.

use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use ng_core::ports::{CollaboratorError, NotificationRegistrarPort};

/// Request notification permission and register the device.
///
/// A refusal surfaces as `CollaboratorError::PermissionDenied` so the
/// prefetch coordinator classifies it and degrades to "not registered"
/// without blocking launch.
pub struct RegisterNotifications {
    registrar: Arc<dyn NotificationRegistrarPort>,
}

impl RegisterNotifications {
    pub fn new(registrar: Arc<dyn NotificationRegistrarPort>) -> Self {
        Self { registrar }
    }

    /// Returns `Ok(true)` once the device is registered.
    pub async fn execute(&self) -> anyhow::Result<bool> {
        let span = info_span!("usecase.register_notifications.execute");

        async {
            let granted = self.registrar.request_authorization().await?;
            if !granted {
                info!("Notification authorization refused, skipping registration");
                return Err(CollaboratorError::PermissionDenied(
                    "notification authorization refused".to_string(),
                )
                .into());
            }

            self.registrar.register().await?;
            info!("Device registered for notifications");
            Ok(true)
        }
        .instrument(span)
        .await
    }
}
