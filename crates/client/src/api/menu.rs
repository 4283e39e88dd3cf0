//! Menu endpoints.

use teezy_core::MenuItem;
use tracing::instrument;

use super::{ApiClient, RequestError};

impl ApiClient {
    /// Fetch the current menu (`GET /menu/`).
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the request fails.
    #[instrument(skip(self))]
    pub async fn menu(&self) -> Result<Vec<MenuItem>, RequestError> {
        self.get_json("/menu/").await
    }
}
