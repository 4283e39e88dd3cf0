//! Session state and cart workflows.
//!
//! A [`ShopSession`] owns everything mutable about one user session: the
//! cart, the menu cache, the last known loyalty balance and the submission
//! state. Every mutating method takes `&mut self`, so cart changes are
//! applied one at a time in the order they were issued, each finishing its
//! persistence write before the next begins.

use std::sync::Arc;

use rust_decimal::Decimal;
use teezy_core::{
    Cart, Catalog, CreatedOrder, Discount, LoyaltyBalance, MenuItemId, OrderValidationError,
    Promotion, QuantityChange, SaveFavoriteRequest, StoreId, SubmissionState,
};
use tracing::{info, instrument, warn};

use crate::api::ApiClient;
use crate::catalog::CatalogCache;
use crate::checkout::SubmitControl;
use crate::config::ClientConfig;
use crate::error::{Result, SessionError};
use crate::host::{HostEvent, HostPlatform};
use crate::store::{FileStore, KeyValueStore, LocalCartStore};

/// Outcome of [`ShopSession::load_favorite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    /// The cart now holds the favorite order.
    Loaded {
        /// Lines in the new cart.
        lines: usize,
        /// Lines whose item is no longer on the menu.
        missing: usize,
    },
    /// The user kept their current cart.
    Declined,
}

/// One user's ordering session.
pub struct ShopSession<S> {
    pub(crate) api: ApiClient,
    pub(crate) host: Arc<dyn HostPlatform>,
    pub(crate) store: LocalCartStore<S>,
    pub(crate) catalog: CatalogCache,
    pub(crate) cart: Cart,
    pub(crate) loyalty: Option<LoyaltyBalance>,
    pub(crate) store_id: StoreId,
    pub(crate) submit_control: SubmitControl,
    pub(crate) submission: SubmissionState,
}

impl<S> std::fmt::Debug for ShopSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopSession")
            .field("api", &self.api)
            .field("cart_lines", &self.cart.len())
            .field("menu_items", &self.catalog.catalog().len())
            .field("loyalty", &self.loyalty)
            .field("store_id", &self.store_id)
            .field("submission", &self.submission)
            .finish_non_exhaustive()
    }
}

impl ShopSession<FileStore> {
    /// Session backed by the configured data directory.
    #[must_use]
    pub fn from_config(config: &ClientConfig, host: Arc<dyn HostPlatform>) -> Self {
        let api = ApiClient::new(&config.api_base, Arc::clone(&host));
        let store = LocalCartStore::new(FileStore::new(&config.data_dir));
        Self::new(api, host, store, config.store_id)
    }
}

impl<S: KeyValueStore> ShopSession<S> {
    /// Start a session, restoring the persisted cart.
    pub fn new(
        api: ApiClient,
        host: Arc<dyn HostPlatform>,
        store: LocalCartStore<S>,
        store_id: StoreId,
    ) -> Self {
        let cart = store.load();
        info!(lines = cart.len(), "Session started");

        Self {
            api,
            host,
            store,
            catalog: CatalogCache::new(),
            cart,
            loyalty: None,
            store_id,
            submit_control: SubmitControl::default(),
            submission: SubmissionState::Idle,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        self.catalog.catalog()
    }

    #[must_use]
    pub const fn catalog_cache(&self) -> &CatalogCache {
        &self.catalog
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Persisted cart slot.
    #[must_use]
    pub const fn cart_store(&self) -> &LocalCartStore<S> {
        &self.store
    }

    /// Last loyalty balance fetched, if any.
    #[must_use]
    pub const fn loyalty(&self) -> Option<LoyaltyBalance> {
        self.loyalty
    }

    /// Cart total at snapshotted prices.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Fetch the menu into the session cache.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Request` if the menu could not be fetched;
    /// the previous menu stays in place.
    pub async fn refresh_catalog(&mut self) -> Result<()> {
        self.catalog.refresh(&self.api).await?;
        Ok(())
    }

    /// Add one unit of a menu item and persist the cart.
    ///
    /// Returns the item's new quantity.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Cart` if the item is not on the current menu.
    #[instrument(skip(self), fields(item_id = %id))]
    pub fn add_item(&mut self, id: MenuItemId) -> Result<u32> {
        let quantity = match self.cart.add_item(self.catalog.catalog(), id) {
            Ok(line) => {
                info!(name = %line.name, quantity = line.quantity, "Added to cart");
                line.quantity
            }
            Err(e) => {
                warn!(error = %e, "Add to cart rejected");
                return Err(e.into());
            }
        };

        self.store.save(&self.cart);
        self.host.notify(HostEvent::Impact);
        Ok(quantity)
    }

    /// Change a line's quantity by `delta` and persist the cart.
    ///
    /// A missing line is left alone; a quantity at or below zero removes the line.
    #[instrument(skip(self), fields(item_id = %id))]
    pub fn change_quantity(&mut self, id: MenuItemId, delta: i32) -> QuantityChange {
        let change = self.cart.change_quantity(id, delta);
        if change.is_mutation() {
            info!(?change, "Cart quantity changed");
            self.store.save(&self.cart);
            self.host.notify(HostEvent::Impact);
        }
        change
    }

    /// Empty the cart and its persisted copy.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.store.clear();
        info!("Cart cleared");
    }

    /// Fetch the loyalty balance and remember it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Request` if the balance could not be fetched.
    pub async fn refresh_loyalty(&mut self) -> Result<LoyaltyBalance> {
        let balance = self.api.loyalty_balance().await?;
        info!(points = balance.points, "Loyalty balance loaded");
        self.loyalty = Some(balance);
        Ok(balance)
    }

    /// Replace the cart with the saved favorite order.
    ///
    /// When the cart already has lines the host is asked to confirm first.
    /// Items that left the menu are kept as placeholder lines priced at zero.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoFavoriteOrder` if nothing is saved, or
    /// `SessionError::Request` if the favorite could not be fetched.
    #[instrument(skip(self))]
    pub async fn load_favorite(&mut self) -> Result<FavoriteOutcome> {
        let favorite = self
            .api
            .favorite_order()
            .await?
            .filter(|favorite| !favorite.is_empty())
            .ok_or(SessionError::NoFavoriteOrder)?;

        if !self.cart.is_empty()
            && !self
                .host
                .confirm("Replace the current cart with your favorite order?")
        {
            info!("Favorite order declined, cart kept");
            return Ok(FavoriteOutcome::Declined);
        }

        if !self.catalog.is_loaded()
            && let Err(e) = self.catalog.refresh(&self.api).await
        {
            warn!(error = %e, "Loading favorite without a menu, names will be placeholders");
        }

        let missing = favorite
            .order_details
            .iter()
            .filter(|line| self.catalog.find_by_id(line.menu_item_id).is_none())
            .count();

        self.cart
            .replace_all(self.catalog.catalog(), &favorite.order_details);
        self.store.save(&self.cart);

        info!(lines = self.cart.len(), missing, "Favorite order loaded");
        self.host
            .notify(HostEvent::Alert("Favorite order loaded".to_string()));

        Ok(FavoriteOutcome::Loaded {
            lines: self.cart.len(),
            missing,
        })
    }

    /// Save the current cart as the favorite order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Validation` if the cart is empty, or
    /// `SessionError::Request` if the backend rejects it.
    #[instrument(skip(self))]
    pub async fn save_favorite(&self, name: Option<String>) -> Result<()> {
        if self.cart.is_empty() {
            return Err(OrderValidationError::EmptyCart.into());
        }

        let request = SaveFavoriteRequest {
            items: self.cart.to_order_lines(),
            name,
        };
        self.api.save_favorite_order(&request).await?;

        info!(lines = request.items.len(), "Favorite order saved");
        self.host
            .notify(HostEvent::Alert("Favorite order saved".to_string()));
        Ok(())
    }

    /// Fetch promotions and discount codes together.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Request` if either request fails.
    pub async fn promotions(&self) -> Result<(Vec<Promotion>, Vec<Discount>)> {
        let (promotions, discounts) =
            tokio::try_join!(self.api.promotions(), self.api.discounts())?;
        info!(
            promotions = promotions.len(),
            discounts = discounts.len(),
            "Promotions loaded"
        );
        Ok((promotions, discounts))
    }

    /// Fetch the user's past orders.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Request` if the request fails.
    pub async fn order_history(&self) -> Result<Vec<CreatedOrder>> {
        Ok(self.api.my_orders().await?)
    }
}
