//! Order endpoints.

use teezy_core::{CreatedOrder, OrderRequest};
use tracing::instrument;

use super::{ApiClient, RequestError};

impl ApiClient {
    /// Place an order (`POST /orders/`).
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the backend rejects the order or the request fails.
    #[instrument(skip(self, request), fields(lines = request.items.len(), store_id = %request.store_id))]
    pub async fn create_order(&self, request: &OrderRequest) -> Result<CreatedOrder, RequestError> {
        self.post_json("/orders/", request).await
    }

    /// Fetch the user's order history, newest first (`GET /orders/my`).
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the request fails.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<CreatedOrder>, RequestError> {
        self.get_json("/orders/my").await
    }
}
