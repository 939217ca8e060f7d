//! Admin routes: user management and application review.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiResult,
    middleware::auth::AdminUser,
    routes::{application_response, identity_response},
};
use meridian_core::application::{ReviewAction, loan_duration};
use meridian_core::identity::Role;
use meridian_db::{ApplicationRepository, UserRepository};
use meridian_shared::api::{
    AdminUserRow, ApplicationActionRequest, ApplicationResponse, MessageResponse, SetRoleRequest,
};

/// Creates the admin router. Every handler takes [`AdminUser`], so a
/// non-admin session gets 403 before any work happens.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}", delete(delete_user))
        .route("/admin/users/{id}/role", post(set_role))
        .route("/admin/users/{id}/verify-nin", post(verify_nin))
        .route("/admin/applications", get(list_applications))
        .route("/admin/applications/{id}/action", post(review_application))
        .route("/admin/applications/{id}", delete(delete_application))
}

/// GET /api/admin/users - All identities, each with its derived
/// outstanding figure and, when one is outstanding, the metadata of the
/// loan backing it.
async fn list_users(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<impl IntoResponse> {
    let user_repo = UserRepository::new(state.db.clone());
    let app_repo = ApplicationRepository::new(state.db.clone());

    let users = user_repo.list_all().await?;
    let mut rows = Vec::with_capacity(users.len());

    for user in users {
        let outstanding = app_repo.outstanding_loan_for(user.id).await?;

        let (loan_approved_at, loan_duration) = if outstanding > Decimal::ZERO {
            match app_repo.latest_approved_loan_for(user.id).await? {
                Some(loan) => (
                    loan.approved_at.map(DateTime::<Utc>::from),
                    loan_duration(&loan.details).map(ToString::to_string),
                ),
                None => (None, None),
            }
        } else {
            (None, None)
        };

        rows.push(AdminUserRow {
            identity: identity_response(&user, outstanding),
            loan_approved_at,
            loan_duration,
        });
    }

    Ok(Json(rows))
}

/// DELETE /api/admin/users/{id} - Remove an identity and everything
/// hanging off it. Self-deletion is refused.
async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    UserRepository::new(state.db.clone())
        .delete_with_applications(admin.0.user.id, id)
        .await?;

    info!(target = %id, admin = %admin.0.user.id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}

/// POST /api/admin/users/{id}/role - Change an identity's role.
async fn set_role(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetRoleRequest>,
) -> ApiResult<impl IntoResponse> {
    let role = Role::parse(&payload.role)?;
    let user = UserRepository::new(state.db.clone())
        .set_role(id, role)
        .await?;

    info!(target = %id, role = %role, admin = %admin.0.user.id, "Role changed");

    let outstanding = ApplicationRepository::new(state.db.clone())
        .outstanding_loan_for(user.id)
        .await?;
    Ok(Json(identity_response(&user, outstanding)))
}

/// POST /api/admin/users/{id}/verify-nin - Mark a NIN verified, after
/// which it is immutable. Idempotent.
async fn verify_nin(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let user = UserRepository::new(state.db.clone())
        .verify_nin(id)
        .await?;

    info!(target = %id, admin = %admin.0.user.id, "NIN verified");

    let outstanding = ApplicationRepository::new(state.db.clone())
        .outstanding_loan_for(user.id)
        .await?;
    Ok(Json(identity_response(&user, outstanding)))
}

/// GET /api/admin/applications - Full review queue, newest first.
async fn list_applications(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<impl IntoResponse> {
    let applications = ApplicationRepository::new(state.db.clone())
        .list_all()
        .await
        .map_err(crate::error::ApiError::from)?;

    Ok(Json(
        applications
            .into_iter()
            .map(application_response)
            .collect::<Vec<ApplicationResponse>>(),
    ))
}

/// POST /api/admin/applications/{id}/action - Approve or reject.
///
/// The flip is compare-and-set on Pending, so concurrent reviews cannot
/// both land; the loser sees the application as already final. A loan
/// approval may override the amount, and the new figure reaches readers
/// through reconciliation alone.
async fn review_application(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApplicationActionRequest>,
) -> ApiResult<impl IntoResponse> {
    let action = ReviewAction::parse(&payload.action)?;

    let application = ApplicationRepository::new(state.db.clone())
        .transition(id, action, admin.0.user.id, payload.amount)
        .await?;

    info!(
        application_id = %id,
        action = %payload.action,
        admin = %admin.0.user.id,
        "Application reviewed"
    );

    Ok(Json(application_response(application)))
}

/// DELETE /api/admin/applications/{id} - Remove an application outright.
async fn delete_application(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    ApplicationRepository::new(state.db.clone())
        .delete(id)
        .await?;

    info!(application_id = %id, admin = %admin.0.user.id, "Application deleted");
    Ok(Json(MessageResponse::new("Application deleted")))
}
