//! corganize API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Resource operations live in the model modules.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use tracing::Instrument;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{CorganizeError, Result};
use crate::pagination::RequestOptions;

const USER_AGENT: &str = concat!("corganize/", env!("CARGO_PKG_VERSION"));

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "apikey";

/// Header carrying the continuation token on paginated requests.
pub const NEXT_TOKEN_HEADER: &str = "nexttoken";

/// Join a base URL and a resource path with exactly one `/` between them.
///
/// Leading and trailing slashes on either segment are ignored.
///
/// ```
/// assert_eq!(corganize::compose_url("http://h/", "/files"), "http://h/files");
/// assert_eq!(corganize::compose_url("http://h", "files/active/"), "http://h/files/active");
/// ```
pub fn compose_url(base_url: &str, resource: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_matches('/'),
        resource.trim_matches('/')
    )
}

/// Low-level corganize API client.
///
/// Handles authentication and HTTP requests. Connection parameters are
/// fixed at construction.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use corganize::CorganizeClient;
///
/// # async fn example() -> corganize::Result<()> {
/// let client = CorganizeClient::new("https://corganize.example.com/api", "your-api-key")?;
/// let files = client.get_recent_files(50).await?;
/// println!("{} recent files", files.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CorganizeClient {
    http: Client,
    base_url: Arc<str>,
    api_key: String,
    span: tracing::Span,
}

impl std::fmt::Debug for CorganizeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorganizeClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CorganizeClient {
    /// Create a new client with the provided base URL and API key.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is empty or the base URL is invalid.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new(base_url, api_key))
    }

    /// Create a client from a full [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the config fails validation, the base URL is not
    /// an absolute URL, or the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Url::parse(&config.base_url)?;

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_deref().unwrap_or(USER_AGENT))
            .brotli(true)
            .gzip(true)
            .deflate(true);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CorganizeError::HttpError)?;

        let base_url: Arc<str> = Arc::from(config.base_url.as_str());
        let span = tracing::info_span!("corganize", base_url = %base_url);

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
            span,
        })
    }

    /// Attach the span under which this client records its events.
    ///
    /// Every request span and pagination event becomes a child of `span`.
    #[must_use]
    pub fn with_span(mut self, span: tracing::Span) -> Self {
        self.span = span;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The span this client logs under.
    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    /// Build the absolute URL for a resource path.
    pub fn url_for(&self, resource: &str) -> String {
        compose_url(&self.base_url, resource)
    }

    /// Make a GET request.
    pub async fn get(&self, resource: &str) -> Result<Response> {
        self.get_with_options(resource, &RequestOptions::default())
            .await
    }

    /// Make a GET request with extra headers from `options`.
    ///
    /// An `apikey` entry in `options` is ignored; the client's key is always
    /// the only one sent.
    pub async fn get_with_options(
        &self,
        resource: &str,
        options: &RequestOptions,
    ) -> Result<Response> {
        let mut request = self.request(Method::GET, resource);
        for (name, value) in options.headers().filter(|(name, _)| *name != API_KEY_HEADER) {
            request = request.header(name, value);
        }
        self.send(Method::GET, resource, request).await
    }

    /// Make a POST request with JSON body.
    pub async fn post<B: Serialize + ?Sized>(&self, resource: &str, body: &B) -> Result<Response> {
        let request = self.request(Method::POST, resource).json(body);
        self.send(Method::POST, resource, request).await
    }

    /// Make a PATCH request with JSON body.
    pub async fn patch<B: Serialize + ?Sized>(&self, resource: &str, body: &B) -> Result<Response> {
        let request = self.request(Method::PATCH, resource).json(body);
        self.send(Method::PATCH, resource, request).await
    }

    /// Make a DELETE request with JSON body.
    pub async fn delete<B: Serialize + ?Sized>(
        &self,
        resource: &str,
        body: &B,
    ) -> Result<Response> {
        let request = self.request(Method::DELETE, resource).json(body);
        self.send(Method::DELETE, resource, request).await
    }

    fn request(&self, method: Method, resource: &str) -> RequestBuilder {
        self.http
            .request(method, self.url_for(resource))
            .header(API_KEY_HEADER, &self.api_key)
    }

    async fn send(
        &self,
        method: Method,
        resource: &str,
        request: RequestBuilder,
    ) -> Result<Response> {
        let span = tracing::debug_span!(parent: &self.span, "request", %method, resource);

        async {
            let response = request.send().await.map_err(CorganizeError::HttpError)?;
            tracing::debug!(status = response.status().as_u16(), "response received");
            Self::check_response(response).await
        }
        .instrument(span)
        .await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.map_err(CorganizeError::HttpError)?;
        let message = if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        };

        tracing::warn!(status = status.as_u16(), %message, "request failed");
        Err(CorganizeError::ApiError {
            message,
            status_code: status.as_u16(),
        })
    }
}
