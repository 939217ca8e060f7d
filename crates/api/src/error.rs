//! HTTP error responder.
//!
//! Converts domain and repository errors into the uniform JSON error
//! envelope `{ "error": CODE, "message": ... }` with the status code
//! dictated by [`AppError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

use meridian_core::application::ApplicationError as DomainApplicationError;
use meridian_core::auth::PasswordError;
use meridian_core::identity::IdentityError;
use meridian_db::repositories::{ApplicationError, UserError};
use meridian_shared::{AppError, EmailError};

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wrapper that renders [`AppError`] as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                Self(AppError::StoreUnavailable(err.to_string()))
            }
            _ => Self(AppError::Internal(err.to_string())),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateEmail(email) => Self(AppError::DuplicateIdentity(email)),
            UserError::NinLocked => Self(AppError::NinLocked),
            UserError::NinConflict => Self(AppError::NinConflict),
            UserError::Validation(msg) => Self(AppError::Validation(msg)),
            UserError::SelfDeletion => Self(AppError::SelfDeletionForbidden),
            UserError::NotFound(id) => Self(AppError::NotFound(format!("user {id}"))),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::NotFound(id) => {
                Self(AppError::NotFound(format!("application {id}")))
            }
            ApplicationError::AlreadyFinal(status) => Self(AppError::AlreadyFinal(status)),
            ApplicationError::Validation(msg) => Self(AppError::Validation(msg)),
            ApplicationError::Database(e) => e.into(),
        }
    }
}

impl From<DomainApplicationError> for ApiError {
    fn from(err: DomainApplicationError) -> Self {
        match err {
            DomainApplicationError::Validation(msg) => Self(AppError::Validation(msg)),
            DomainApplicationError::UnknownKind(kind) => Self(AppError::Validation(format!(
                "unknown application type '{kind}'"
            ))),
            DomainApplicationError::UnknownAction(action) => {
                Self(AppError::Validation(format!("unknown action '{action}'")))
            }
            DomainApplicationError::AlreadyFinal(status) => {
                Self(AppError::AlreadyFinal(status.as_str().to_string()))
            }
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Validation(msg) => Self(AppError::Validation(msg)),
            IdentityError::UnknownRole(role) => {
                Self(AppError::Validation(format!("unknown role '{role}'")))
            }
            IdentityError::NinLocked => Self(AppError::NinLocked),
            IdentityError::NinConflict => Self(AppError::NinConflict),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooShort => Self(AppError::Validation(err.to_string())),
            // Hashing internals never reach callers in detail.
            _ => Self(AppError::Internal("password processing failed".to_string())),
        }
    }
}

impl From<EmailError> for ApiError {
    fn from(err: EmailError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}
