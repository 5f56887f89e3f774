//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::services::{IdentityProvider, MockIdentityProvider, MockProductStore, ProductStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the backend providers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    auth: Arc<dyn IdentityProvider>,
    catalog: Arc<dyn ProductStore>,
}

impl AppState {
    /// Create application state backed by the mock providers.
    ///
    /// The provider delays come from `config.delays`.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        let auth = Arc::new(MockIdentityProvider::new(config.delays.auth));
        let catalog = Arc::new(MockProductStore::new(config.delays.catalog));
        Self::with_providers(config, auth, catalog)
    }

    /// Create application state with explicit providers.
    #[must_use]
    pub fn with_providers(
        config: SiteConfig,
        auth: Arc<dyn IdentityProvider>,
        catalog: Arc<dyn ProductStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                auth,
                catalog,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get the identity provider.
    #[must_use]
    pub fn auth(&self) -> &dyn IdentityProvider {
        self.inner.auth.as_ref()
    }

    /// Get the product store.
    #[must_use]
    pub fn catalog(&self) -> &dyn ProductStore {
        self.inner.catalog.as_ref()
    }
}
