//! File endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::sync::RwLock;

use super::authorize;
use crate::mock_server::state::MockState;
use crate::pagination::{PageMetadata, PageResponse};
use crate::{DeleteFilesRequest, FileRecord, FileView, NEXT_TOKEN_HEADER};

/// GET /files
pub async fn list_recent_files(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> Response {
    list_view(state, headers, FileView::Recent).await
}

/// GET /files/active
pub async fn list_active_files(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> Response {
    list_view(state, headers, FileView::Active).await
}

/// GET /files/stale
pub async fn list_stale_files(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> Response {
    list_view(state, headers, FileView::Stale).await
}

/// GET /files/incomplete
pub async fn list_incomplete_files(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> Response {
    list_view(state, headers, FileView::Incomplete).await
}

async fn list_view(state: Arc<RwLock<MockState>>, headers: HeaderMap, view: FileView) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    // The token is the offset of the next page
    let offset = match headers.get(NEXT_TOKEN_HEADER) {
        None => 0,
        Some(value) => match value.to_str().ok().and_then(|v| v.parse::<usize>().ok()) {
            Some(offset) => offset,
            None => return (StatusCode::BAD_REQUEST, "invalid nexttoken").into_response(),
        },
    };

    let (files, next) = state.page(view, offset);
    state.pages_served += 1;

    let body = PageResponse {
        files,
        metadata: PageMetadata {
            nexttoken: next.map(|n| n.to_string()),
        },
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// POST /files/bulk
pub async fn create_files(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(files): Json<Vec<FileRecord>>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    if files.iter().any(|f| f.fileid().is_none()) {
        return (StatusCode::BAD_REQUEST, "fileid is required").into_response();
    }

    let outcome = state.insert_files(files);
    (
        StatusCode::OK,
        Json(json!({
            "created": outcome.created,
            "skipped": outcome.skipped,
        })),
    )
        .into_response()
}

/// PATCH /files
pub async fn update_file(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(file): Json<FileRecord>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let Some(fileid) = file.fileid().map(str::to_string) else {
        return (StatusCode::BAD_REQUEST, "fileid is required").into_response();
    };

    match state.update_file(file) {
        Some(_) => StatusCode::OK.into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("file not found: {fileid}"),
        )
            .into_response(),
    }
}

/// DELETE /files
pub async fn delete_files(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(request): Json<DeleteFilesRequest>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let deleted = state.delete_files(&request.fileids);
    (StatusCode::OK, Json(json!({ "deleted": deleted }))).into_response()
}
