//! Self-service profile routes.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::info;

use crate::{AppState, error::ApiResult, middleware::auth::CurrentUser, routes::identity_response};
use meridian_db::{ApplicationRepository, UserRepository, repositories::UpdateProfileInput};
use meridian_shared::AppError;
use meridian_shared::api::{ProfilePictureRequest, UpdateProfileRequest};

/// Creates the user profile router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(current_user))
        .route("/user/update", post(update_profile))
        .route("/user/profile-picture", post(set_profile_picture))
}

/// GET /api/user - The authenticated identity with its derived
/// outstanding-loan figure.
async fn current_user(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<impl IntoResponse> {
    let outstanding = ApplicationRepository::new(state.db.clone())
        .outstanding_loan_for(current.user.id)
        .await?;

    Ok(Json(identity_response(&current.user, outstanding)))
}

/// POST /api/user/update - Apply a partial profile update.
async fn update_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<impl IntoResponse> {
    let user_repo = UserRepository::new(state.db.clone());
    let user = user_repo
        .update_profile(
            current.user.id,
            UpdateProfileInput {
                phone: payload.phone,
                address: payload.address,
                nin: payload.nin,
            },
        )
        .await?;

    info!(user_id = %user.id, "Profile updated");

    let outstanding = ApplicationRepository::new(state.db.clone())
        .outstanding_loan_for(user.id)
        .await?;

    Ok(Json(identity_response(&user, outstanding)))
}

/// POST /api/user/profile-picture - Store an opaque picture reference.
async fn set_profile_picture(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<ProfilePictureRequest>,
) -> ApiResult<impl IntoResponse> {
    let path = payload.path.trim();
    if path.is_empty() {
        return Err(AppError::Validation("path is required".to_string()).into());
    }

    let user_repo = UserRepository::new(state.db.clone());
    let user = user_repo.set_profile_picture(current.user.id, path).await?;

    let outstanding = ApplicationRepository::new(state.db.clone())
        .outstanding_loan_for(user.id)
        .await?;

    Ok(Json(identity_response(&user, outstanding)))
}
