//! Session-scoped menu cache.

use teezy_core::{Catalog, MenuItem, MenuItemId};
use tracing::{info, instrument, warn};

use crate::api::{ApiClient, RequestError};

/// Menu fetched from the backend, held for the session.
#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    catalog: Catalog,
    loaded: bool,
}

impl CatalogCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached menu with a fresh copy from the backend.
    ///
    /// On failure the previous contents are kept.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the menu could not be fetched.
    #[instrument(skip_all)]
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), RequestError> {
        match api.menu().await {
            Ok(items) => {
                info!(items = items.len(), "Menu loaded");
                self.replace(items);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, kept = self.catalog.len(), "Menu refresh failed");
                Err(e)
            }
        }
    }

    /// Replace the cached menu wholesale.
    pub fn replace(&mut self, items: Vec<MenuItem>) {
        self.catalog = Catalog::new(items);
        self.loaded = true;
    }

    #[must_use]
    pub fn find_by_id(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.catalog.find_by_id(id)
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether a refresh has ever succeeded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }
}
