//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart::CartJournal;
use crate::config::StorefrontConfig;
use crate::shopify::StorefrontClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The Postgres pool is not part of it: only
/// the session layer and the readiness check use the database, and both
/// receive the pool directly.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storefront: StorefrontClient,
    journal: CartJournal,
}

impl AppState {
    /// Create the state with a client for the configured store.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let storefront = StorefrontClient::new(&config.shopify);
        Self::with_client(config, storefront)
    }

    /// Create the state around an existing client (tests point it at a mock).
    #[must_use]
    pub fn with_client(config: StorefrontConfig, storefront: StorefrontClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                storefront,
                journal: CartJournal::new(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Storefront API client.
    #[must_use]
    pub fn storefront(&self) -> &StorefrontClient {
        &self.inner.storefront
    }

    /// Confirmed carts and in-flight cart mutations.
    #[must_use]
    pub fn journal(&self) -> &CartJournal {
        &self.inner.journal
    }
}
