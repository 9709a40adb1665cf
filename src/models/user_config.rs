//! User configuration endpoint.

use serde_json::Value;

use crate::client::CorganizeClient;
use crate::error::Result;

impl CorganizeClient {
    /// Fetch the caller's configuration (`GET /config`).
    ///
    /// The document is service-defined and returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CorganizeError::ApiError`](crate::CorganizeError::ApiError)
    /// carrying the status code on a non-success response.
    #[tracing::instrument(skip(self))]
    pub async fn get_user_config(&self) -> Result<Value> {
        let response = self.get("/config").await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
