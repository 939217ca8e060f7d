//! Public contact-form relay.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use tracing::{error, info};

use crate::{AppState, error::ApiResult};
use meridian_shared::AppError;
use meridian_shared::api::{ContactRequest, MessageResponse};

/// Creates the contact router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/contact", post(submit_contact))
}

/// POST /api/contact - Relay a contact-form message to the support inbox.
///
/// Relay failures are logged, never surfaced: the sender's message is
/// accepted regardless of SMTP health.
async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = payload.email.trim();
    let message = payload.message.trim();
    if email.is_empty() || message.is_empty() {
        return Err(AppError::Validation("email and message are required".to_string()).into());
    }

    let name = payload.name.as_deref().unwrap_or("Anonymous").trim();
    let subject = payload.subject.as_deref().unwrap_or("Website inquiry");

    match state
        .email
        .relay_contact_message(name, email, subject, message)
        .await
    {
        Ok(()) => info!("Contact message relayed"),
        Err(e) => error!(error = %e, "Failed to relay contact message"),
    }

    Ok(Json(MessageResponse::new("Message sent. We'll be in touch.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use sea_orm::DatabaseConnection;

    use meridian_shared::config::EmailConfig;
    use meridian_shared::email::EmailService;

    fn state_with_email(config: EmailConfig) -> AppState {
        AppState {
            db: Arc::new(DatabaseConnection::default()),
            email: Arc::new(EmailService::new(config)),
            session_ttl: chrono::Duration::hours(24),
        }
    }

    #[tokio::test]
    async fn test_relay_failure_still_accepts_the_message() {
        // An unparseable from-address makes every enabled send fail
        // without touching the network.
        let state = state_with_email(EmailConfig {
            enabled: true,
            from_email: "not an address".to_string(),
            ..EmailConfig::default()
        });

        let result = submit_contact(
            State(state),
            Json(ContactRequest {
                name: Some("Jane Doe".to_string()),
                email: "jane@x.com".to_string(),
                subject: None,
                message: "Hello there".to_string(),
            }),
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let state = state_with_email(EmailConfig::default());

        let result = submit_contact(
            State(state),
            Json(ContactRequest {
                name: None,
                email: "jane@x.com".to_string(),
                subject: None,
                message: "   ".to_string(),
            }),
        )
        .await;

        assert!(result.is_err());
    }
}
