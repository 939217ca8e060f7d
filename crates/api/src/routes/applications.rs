//! Public application submission.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use tracing::info;

use crate::{
    AppState, error::ApiResult, middleware::auth::CurrentUser, routes::application_response,
};
use meridian_core::application::Submission;
use meridian_db::ApplicationRepository;
use meridian_shared::api::SubmitApplicationRequest;

/// Creates the submission router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/apply", post(apply))
}

/// POST /api/apply - Submit a service request.
///
/// Anonymous submissions are accepted; when a live session is presented
/// the application is linked to that identity, which is what later feeds
/// the ledger reconciler.
async fn apply(
    State(state): State<AppState>,
    current: Option<CurrentUser>,
    Json(payload): Json<SubmitApplicationRequest>,
) -> ApiResult<impl IntoResponse> {
    let submission = Submission::validate(
        &payload.full_name,
        &payload.email,
        payload.phone.as_deref(),
        &payload.kind,
        payload.details,
    )?;

    let owner_id = current.map(|c| c.user.id);
    let application = ApplicationRepository::new(state.db.clone())
        .create(&submission, owner_id)
        .await
        .map_err(crate::error::ApiError::from)?;

    info!(
        application_id = %application.id,
        kind = %submission.kind,
        owned = owner_id.is_some(),
        "Application submitted"
    );

    Ok((StatusCode::CREATED, Json(application_response(application))))
}
