//! Mock corganize API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the corganize
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server keeps state across requests, so a test
//! can create, list, update and delete files in one workflow.
//!
//! # Example
//!
//! ```ignore
//! use corganize::mock_server::MockServer;
//! use corganize::CorganizeClient;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = CorganizeClient::new(server.url(), "test-key").unwrap();
//!
//!     // Server comes with default fixtures
//!     let active = client.get_active_files(10).await.unwrap();
//!     assert_eq!(active.len(), 2);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{BulkInsert, MockState, DEFAULT_PAGE_SIZE};
