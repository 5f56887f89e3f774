//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use total_aereas_core::{Email, UserId};

/// Fallback name when an identity has neither display name nor email.
const ANONYMOUS_LABEL: &str = "Usuário";

/// Session-stored user identity.
///
/// Produced by the identity provider on sign-in and kept until sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Opaque provider id.
    pub uid: UserId,
    /// Email address, when the sign-in method has one.
    pub email: Option<Email>,
    /// Display name chosen by the provider.
    pub display_name: Option<String>,
}

impl CurrentUser {
    /// Name shown in the dashboard greeting.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .or_else(|| self.email.as_ref().map(Email::as_str))
            .unwrap_or(ANONYMOUS_LABEL)
    }
}

/// Session keys for site state.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Set once the initial auth state has been restored for this session.
    pub const AUTH_READY: &str = "auth_ready";

    /// Key for the pending modal notice.
    pub const FLASH: &str = "flash";

    /// Key for the dashboard's local product list.
    pub const DASHBOARD_PRODUCTS: &str = "dashboard_products";
}
