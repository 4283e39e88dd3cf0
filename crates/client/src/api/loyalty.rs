//! Loyalty balance and favorite-order endpoints.

use serde_json::Value;
use teezy_core::{FavoriteOrder, LoyaltyBalance, SaveFavoriteRequest};
use tracing::instrument;

use super::{ApiClient, RequestError};

impl ApiClient {
    /// Fetch the user's points (`GET /loyalty/balance`).
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the request fails.
    #[instrument(skip(self))]
    pub async fn loyalty_balance(&self) -> Result<LoyaltyBalance, RequestError> {
        self.get_json("/loyalty/balance").await
    }

    /// Fetch the saved favorite order (`GET /loyalty/favorite`).
    ///
    /// The backend answers `null` when nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the request fails.
    #[instrument(skip(self))]
    pub async fn favorite_order(&self) -> Result<Option<FavoriteOrder>, RequestError> {
        self.get_json("/loyalty/favorite").await
    }

    /// Save the favorite order (`POST /loyalty/favorite`).
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the request fails.
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    pub async fn save_favorite_order(
        &self,
        request: &SaveFavoriteRequest,
    ) -> Result<(), RequestError> {
        let _: Value = self.post_json("/loyalty/favorite", request).await?;
        Ok(())
    }
}
