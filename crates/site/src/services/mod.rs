//! Backend services for the site.
//!
//! # Services
//!
//! - `auth` - Identity provider contract, input validation, mock provider
//! - `catalog` - Product store contract and mock store
//!
//! Both mocks publish change notifications on broadcast channels;
//! [`spawn_event_log`] drains them into the tracing log.

pub mod auth;
pub mod catalog;

pub use auth::{AuthError, AuthEvent, IdentityProvider, MockIdentityProvider, SocialProvider};
pub use catalog::{CatalogError, CatalogEvent, MockProductStore, ProductStore};

use tokio::sync::broadcast::{Receiver, error::RecvError};
use tokio::task::JoinHandle;

/// Log every auth and catalog notification until both channels close.
pub fn spawn_event_log(
    mut auth: Receiver<AuthEvent>,
    mut catalog: Receiver<CatalogEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut auth_open = true;
        let mut catalog_open = true;

        while auth_open || catalog_open {
            tokio::select! {
                event = auth.recv(), if auth_open => match event {
                    Ok(AuthEvent::SignedIn { user, method }) => {
                        tracing::info!(uid = %user.uid, ?method, "auth state changed: signed in");
                    }
                    Ok(AuthEvent::SignedOut { uid }) => {
                        tracing::info!(%uid, "auth state changed: signed out");
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "auth event log lagged");
                    }
                    Err(RecvError::Closed) => auth_open = false,
                },
                event = catalog.recv(), if catalog_open => match event {
                    Ok(CatalogEvent::Listed { count }) => {
                        tracing::debug!(count, "product list delivered");
                    }
                    Ok(CatalogEvent::Created { id, name }) => {
                        tracing::info!(%id, %name, "product document created");
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "catalog event log lagged");
                    }
                    Err(RecvError::Closed) => catalog_open = false,
                },
            }
        }
    })
}
