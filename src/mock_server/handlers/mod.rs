//! HTTP request handlers for the mock server.

pub mod config;
pub mod files;

pub use config::*;
pub use files::*;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::mock_server::state::MockState;
use crate::API_KEY_HEADER;

/// Reject the request with 401 unless it carries the expected API key.
fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if state.is_authorized(api_key) {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid apikey").into_response())
    }
}
