//! Site-content routes.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get, routing::post};
use tracing::info;

use crate::{AppState, error::ApiResult, middleware::auth::AdminUser};
use meridian_db::ContentRepository;
use meridian_shared::AppError;
use meridian_shared::api::ContentUpdateRequest;

/// Creates the public content router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/content", get(get_content))
}

/// Creates the admin content router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/content", post(update_content))
}

/// GET /api/content - The full key/value map of site copy.
async fn get_content(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let content = ContentRepository::new(state.db.clone())
        .as_map()
        .await
        .map_err(crate::error::ApiError::from)?;

    Ok(Json(content))
}

/// POST /api/content - Batched upsert of site copy. Keys absent from the
/// batch are left untouched.
async fn update_content(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<ContentUpdateRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.updates.is_empty() {
        return Err(AppError::Validation("updates must not be empty".to_string()).into());
    }
    if payload.updates.keys().any(|k| k.trim().is_empty()) {
        return Err(AppError::Validation("content keys must not be empty".to_string()).into());
    }

    let repo = ContentRepository::new(state.db.clone());
    repo.upsert_many(&payload.updates).await?;

    info!(
        keys = payload.updates.len(),
        admin = %admin.0.user.id,
        "Site content updated"
    );

    let content = repo.as_map().await?;
    Ok(Json(content))
}
