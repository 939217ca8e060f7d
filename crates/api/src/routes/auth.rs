//! Authentication routes: register, login, logout, forgot password.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::post,
};
use tracing::{error, info};

use crate::{
    AppState,
    error::ApiResult,
    middleware::auth::extract_bearer_token,
    routes::identity_response,
};
use meridian_core::auth::{hash_password, validate_password, verify_password};
use meridian_core::identity::NewIdentity;
use meridian_db::{ApplicationRepository, SessionRepository, UserRepository};
use meridian_shared::AppError;
use meridian_shared::api::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/forgot-password", post(forgot_password))
}

/// POST /api/register - Create a new identity.
///
/// Responds with the created identity; the outstanding-loan figure of a
/// fresh registrant is always zero.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_password(&payload.password)?;
    let registration = NewIdentity {
        full_name: payload.full_name,
        email: payload.email,
        phone: payload.phone,
    }
    .validate()?;

    // Hash before touching the store; the raw password goes no further.
    let password_hash = hash_password(&payload.password)?;

    let user_repo = UserRepository::new(state.db.clone());
    let user = user_repo.create(&registration, &password_hash).await?;

    info!(user_id = %user.id, "New user registered");

    Ok((
        StatusCode::CREATED,
        Json(identity_response(&user, rust_decimal::Decimal::ZERO)),
    ))
}

/// POST /api/login - Authenticate and open a session.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let user_repo = UserRepository::new(state.db.clone());

    // Unknown email and wrong password produce the same failure, so a
    // caller cannot probe which emails are registered.
    let user = user_repo
        .find_by_email(&payload.email)
        .await?
        .ok_or(AppError::AuthFailure)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt");
        return Err(AppError::AuthFailure.into());
    }

    user_repo.touch_last_login(user.id).await?;

    let session_repo = SessionRepository::new(state.db.clone());
    let (token, _session) = session_repo.create(user.id, state.session_ttl).await?;

    let outstanding = ApplicationRepository::new(state.db.clone())
        .outstanding_loan_for(user.id)
        .await?;

    info!(user_id = %user.id, "User logged in");

    let mut user = user;
    user.last_login = Some(chrono::Utc::now().into());

    Ok(Json(LoginResponse {
        token,
        identity: identity_response(&user, outstanding),
    }))
}

/// POST /api/logout - Revoke the presented session. Idempotent: an
/// unknown, expired, or missing token still reports success.
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<impl IntoResponse> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token);

    if let Some(token) = token {
        let revoked = SessionRepository::new(state.db.clone())
            .revoke(token)
            .await?;
        if revoked {
            info!("Session revoked");
        }
    }

    Ok(Json(MessageResponse::new("Logged out")))
}

/// POST /api/forgot-password - Request a password reset.
///
/// The response is identical whether or not the email is registered;
/// delivery failures are logged, never surfaced.
async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    let user_repo = UserRepository::new(state.db.clone());

    if let Some(user) = user_repo.find_by_email(&payload.email).await?
        && let Err(e) = state
            .email
            .send_password_reset(&user.email, &user.full_name)
            .await
    {
        error!(error = %e, "Failed to send password reset email");
    }

    Ok(Json(MessageResponse::new(
        "If that email is registered, reset instructions have been sent.",
    )))
}
