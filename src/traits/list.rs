//! List trait for fetching paginated collections.

use async_trait::async_trait;

use crate::client::CorganizeClient;
use crate::error::Result;
use crate::pagination::{Page, RequestOptions};

/// List entities with token-based pagination.
///
/// Implementors provide a single-page fetch; [`List::list_up_to`] follows
/// continuation tokens until the service runs out of pages or the limit is
/// reached.
///
/// # Example
///
/// ```ignore
/// use corganize::{CorganizeClient, FileRecord, FileView, List, RequestOptions};
///
/// let client = CorganizeClient::new("http://localhost:8080", "key")?;
///
/// // Fetch a single page
/// let page = FileRecord::list_page(&client, &FileView::Active, &RequestOptions::new()).await?;
///
/// // Fetch up to 500 records across pages
/// let files = FileRecord::list_up_to(&client, &FileView::Active, &RequestOptions::new(), 500).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Selects what is being listed.
    type Query: Send + Sync;

    /// Fetch one page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a page.
    async fn list_page(
        client: &CorganizeClient,
        query: &Self::Query,
        options: &RequestOptions,
    ) -> Result<Page<Self>>;

    /// Fetch pages until there is no continuation token or `limit` items
    /// have been collected, then return at most `limit` items in server
    /// order.
    ///
    /// At least one request is always made. `options` is never modified;
    /// each follow-up request uses a fresh value carrying the token.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_up_to(
        client: &CorganizeClient,
        query: &Self::Query,
        options: &RequestOptions,
        limit: usize,
    ) -> Result<Vec<Self>> {
        let mut collected = Vec::new();
        let mut request = options.clone();

        loop {
            let page = Self::list_page(client, query, &request).await?;
            let fetched = page.len();
            let next_token = page.next_token;
            collected.extend(page.items);

            tracing::debug!(
                parent: client.span(),
                fetched,
                collected = collected.len(),
                has_more = next_token.is_some(),
                "fetched page"
            );

            match next_token {
                Some(token) if collected.len() < limit => {
                    request = request.with_next_token(token);
                }
                _ => break,
            }
        }

        if collected.len() > limit {
            tracing::info!(parent: client.span(), limit, "truncating listing to limit");
            collected.truncate(limit);
        }

        Ok(collected)
    }
}
