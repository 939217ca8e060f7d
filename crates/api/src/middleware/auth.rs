//! Authentication middleware for protected routes.
//!
//! Sessions are server-held: the bearer token is an opaque random string
//! resolved against the sessions table on every request, so revocation
//! takes effect immediately.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequestParts, OptionalFromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::AppState;
use meridian_core::identity::Role;
use meridian_db::{SessionRepository, UserRepository, entities::users};

/// Extracts the bearer token from the Authorization header.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// The authenticated identity, resolved from a live session.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The identity row behind the session.
    pub user: users::Model,
}

impl CurrentUser {
    /// Returns the identity's role.
    #[must_use]
    pub fn role(&self) -> Role {
        Role::from(&self.user.role)
    }
}

fn unauthenticated(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "UNAUTHENTICATED",
            "message": message,
        })),
    )
        .into_response()
}

/// Resolves a bearer token to its identity, if the session is live.
async fn resolve_user(state: &AppState, token: &str) -> Result<Option<users::Model>, Response> {
    let session_repo = SessionRepository::new(state.db.clone());
    let session = match session_repo.resolve(token).await {
        Ok(Some(s)) => s,
        Ok(None) => return Ok(None),
        Err(e) => {
            error!(error = %e, "Database error resolving session");
            return Err(
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "INTERNAL_ERROR",
                        "message": "An error occurred during authentication",
                    })),
                )
                    .into_response(),
            );
        }
    };

    let user_repo = UserRepository::new(state.db.clone());
    match user_repo.find_by_id(session.user_id).await {
        // A session whose identity vanished (admin deletion) is dead.
        Ok(user) => Ok(user),
        Err(e) => {
            error!(error = %e, "Database error loading session user");
            Err(
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "INTERNAL_ERROR",
                        "message": "An error occurred during authentication",
                    })),
                )
                    .into_response(),
            )
        }
    }
}

/// Authentication middleware for protected routes.
///
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Resolves it against the session store (expired sessions are absent)
/// 3. Stores the identity in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return unauthenticated("Authorization header with Bearer token is required");
    };

    match resolve_user(&state, token).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(CurrentUser { user });
            next.run(request).await
        }
        Ok(None) => unauthenticated("Session is invalid or has expired"),
        Err(response) => response,
    }
}

/// Best-effort authentication for routes open to anonymous callers.
///
/// A valid session attaches the identity; a missing, invalid, or expired
/// token leaves the request anonymous instead of rejecting it.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token);

    if let Some(token) = token
        && let Ok(Some(user)) = resolve_user(&state, token).await
    {
        request.extensions_mut().insert(CurrentUser { user });
    }

    next.run(request).await
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "UNAUTHENTICATED",
                    "message": "Authentication required",
                })),
            )
        })
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned())
    }
}

/// Extractor that additionally requires the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let current = <CurrentUser as FromRequestParts<S>>::from_request_parts(parts, state).await?;
        if current.role().is_admin() {
            Ok(Self(current))
        } else {
            Err((
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "FORBIDDEN",
                    "message": "Admin access required",
                })),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("Basic abc123"), None);
        assert_eq!(extract_bearer_token("abc123"), None);
    }
}
