//! Route handlers
//!
//! Store calls are synchronous file I/O, so each one runs on the blocking
//! pool and the result is mapped to a JSON response.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use postboard_core::models::{self, timestamp};
use postboard_core::{NewPost, PostFilter, Store, StoreResult};

use super::error::{parse_id, ApiError};
use super::AppState;

/// Run a store operation off the async runtime
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Store) -> StoreResult<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

/// `GET /api/posts`
pub async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<PostFilter>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(filter) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let posts = with_store(&state, move |store| store.list(&filter)).await?;
    Ok(Json(posts).into_response())
}

/// `POST /api/posts`
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<NewPost>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let post = with_store(&state, move |store| store.create(&input)).await?;
    Ok((StatusCode::CREATED, Json(post)).into_response())
}

/// `GET /api/posts/:id`
pub async fn get_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id)?;
    let post = with_store(&state, move |store| store.get(id)).await?;
    Ok(Json(post).into_response())
}

/// `PATCH /api/posts/:id/like`
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id)?;
    let post = with_store(&state, move |store| store.toggle_like(id)).await?;
    Ok(Json(post).into_response())
}

/// `DELETE /api/posts/:id`
pub async fn delete_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id)?;
    let deleted = with_store(&state, move |store| store.delete(id)).await?;
    Ok(Json(json!({
        "message": "Post deleted successfully",
        "deletedPost": deleted,
    }))
    .into_response())
}

/// `GET /api/export`, served as a file download
pub async fn export(State(state): State<AppState>) -> Result<Response, ApiError> {
    let snapshot = with_store(&state, |store| store.export_snapshot()).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(&snapshot.statistics.exported_at)
    );
    tracing::info!(posts = snapshot.statistics.total_posts, "Exported board");
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(snapshot)).into_response())
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "timestamp": timestamp::format(&models::now()),
        "uptime": state.started.elapsed().as_secs_f64(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}

/// `posts-export-YYYY-MM-DD.json`
pub fn export_filename(at: &chrono::DateTime<chrono::Utc>) -> String {
    format!("posts-export-{}.json", at.format("%Y-%m-%d"))
}
