//! Promotion and discount-code endpoints. Display-only.

use teezy_core::{Discount, Promotion};
use tracing::instrument;

use super::{ApiClient, RequestError};

impl ApiClient {
    /// Fetch active promotions (`GET /promotions/`).
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the request fails.
    #[instrument(skip(self))]
    pub async fn promotions(&self) -> Result<Vec<Promotion>, RequestError> {
        self.get_json("/promotions/").await
    }

    /// Fetch published discount codes (`GET /promotions/discounts`).
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the request fails.
    #[instrument(skip(self))]
    pub async fn discounts(&self) -> Result<Vec<Discount>, RequestError> {
        self.get_json("/promotions/discounts").await
    }
}
