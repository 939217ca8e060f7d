//! API route definitions.

use axum::{Router, middleware};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    AppState,
    middleware::auth::{auth_middleware, optional_auth_middleware},
};
use meridian_core::application::ApplicationStatus;
use meridian_core::identity::Role;
use meridian_db::entities::{applications as application_entities, users as user_entities};
use meridian_shared::api::{ApplicationResponse, IdentityResponse};

pub mod admin;
pub mod applications;
pub mod auth;
pub mod contact;
pub mod content;
pub mod health;
pub mod users;

/// Creates the API router: public routes, optionally-authenticated
/// submission, and session-protected user and admin surfaces.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Submission accepts anonymous callers but attaches ownership when a
    // live session is presented.
    let submission_routes = applications::routes().layer(middleware::from_fn_with_state(
        state.clone(),
        optional_auth_middleware,
    ));

    let protected_routes = Router::new()
        .merge(users::routes())
        .merge(admin::routes())
        .merge(content::admin_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(contact::routes())
        .merge(content::routes())
        .merge(submission_routes)
        .merge(protected_routes)
}

/// Serializes an identity row, attaching the derived outstanding-loan
/// figure supplied by the caller.
pub(crate) fn identity_response(user: &user_entities::Model, outstanding: Decimal) -> IdentityResponse {
    IdentityResponse {
        id: user.id,
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        address: user.address.clone(),
        role: Role::from(&user.role).as_str().to_string(),
        account_number: user.account_number.clone(),
        account_balance: user.account_balance,
        outstanding_loan_amount: outstanding,
        nin: user.nin.clone(),
        nin_verified: user.nin_verified,
        profile_picture: user.profile_picture.clone(),
        created_at: user.created_at.into(),
        last_login: user.last_login.map(DateTime::<Utc>::from),
    }
}

/// Serializes an application row.
pub(crate) fn application_response(application: application_entities::Model) -> ApplicationResponse {
    ApplicationResponse {
        id: application.id,
        owner_id: application.user_id,
        full_name: application.full_name,
        email: application.email,
        phone: application.phone,
        kind: meridian_core::application::ApplicationKind::from(&application.application_type)
            .as_str()
            .to_string(),
        status: ApplicationStatus::from(&application.status)
            .as_str()
            .to_string(),
        details: application.details,
        created_at: application.created_at.into(),
        approved_at: application.approved_at.map(DateTime::<Utc>::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_db::entities::sea_orm_active_enums::UserRole;
    use uuid::Uuid;

    #[test]
    fn test_fresh_registrant_identity_carries_zero_figure() {
        let now = chrono::Utc::now().into();
        let user = user_entities::Model {
            id: Uuid::new_v4(),
            full_name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            phone: Some("555-0100".to_string()),
            address: "Not Provided".to_string(),
            role: UserRole::User,
            account_number: "5550100123".to_string(),
            account_balance: Decimal::ZERO,
            nin: None,
            nin_verified: false,
            profile_picture: None,
            created_at: now,
            last_login: None,
            updated_at: now,
        };

        let identity = identity_response(&user, Decimal::ZERO);

        assert_eq!(identity.id, user.id);
        assert_eq!(identity.full_name, "Jane Doe");
        assert_eq!(identity.email, "jane@x.com");
        assert_eq!(identity.role, "user");
        assert_eq!(identity.outstanding_loan_amount, Decimal::ZERO);
        assert!(identity.last_login.is_none());
    }
}
