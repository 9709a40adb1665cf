//! corganize API client library.
//!
//! A thin async client for the corganize file-catalog REST API. Each method
//! maps onto one endpoint, attaches the `apikey` header, and turns
//! non-success responses into [`CorganizeError::ApiError`].
//!
//! # Quick Start
//!
//! ```no_run
//! use corganize::{CorganizeClient, FileRecord};
//!
//! #[tokio::main]
//! async fn main() -> corganize::Result<()> {
//!     let client = CorganizeClient::new("https://corganize.example.com/api", "my-api-key")?;
//!
//!     // Follows `nexttoken` until 100 records are collected or pages run out
//!     let active = client.get_active_files(100).await?;
//!     println!("Found {} active files", active.len());
//!
//!     // Bulk create, then mark one of them updated
//!     let file = FileRecord::with_id("abc123").with_field("filename", "movie.mp4");
//!     client.create_files(&[file.clone()]).await?;
//!     client.update_file(&file.with_field("isactive", true)).await?;
//!
//!     client.delete_files(&["abc123"]).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Pagination
//!
//! Listing endpoints return `{"files": [...], "metadata": {"nexttoken": ...}}`.
//! The token is sent back in the `nexttoken` request header. The [`List`]
//! trait runs the loop; results are fully collected and truncated to the
//! requested limit before they are returned.
//!
//! # Logging
//!
//! The client emits `tracing` events under its own span. Attach a span of
//! your own with [`CorganizeClient::with_span`] to nest them.

mod client;
mod config;
mod error;
mod models;
mod pagination;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{compose_url, CorganizeClient, API_KEY_HEADER, NEXT_TOKEN_HEADER};
pub use config::ClientConfig;
pub use error::{CorganizeError, Result};
pub use pagination::{Page, PageMetadata, PageResponse, RequestOptions};

// Re-export traits
pub use traits::List;

// Re-export models
pub use models::{DeleteFilesRequest, FileRecord, FileView};
