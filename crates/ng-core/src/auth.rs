//! Authentication state as observed by the launch flow.

use serde::{Deserialize, Serialize};

/// Authentication state reported by the auth provider.
///
/// The launch flow only reads this value; it is owned by the auth collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    pub fn from_authenticated(authenticated: bool) -> Self {
        if authenticated {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    pub fn is_authenticated(self) -> bool {
        matches!(self, AuthState::Authenticated)
    }
}
