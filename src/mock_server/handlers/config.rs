//! User configuration handler.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tokio::sync::RwLock;

use super::authorize;
use crate::mock_server::state::MockState;

/// GET /config
pub async fn get_user_config(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    (StatusCode::OK, Json(state.user_config.clone())).into_response()
}
