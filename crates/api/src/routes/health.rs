//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Whether the database answered a ping.
    pub database: &'static str,
}

/// Health check handler; degrades rather than failing when the store is
/// unreachable.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let ping = state
        .db
        .execute(Statement::from_string(
            state.db.get_database_backend(),
            "SELECT 1",
        ))
        .await;

    Json(HealthResponse {
        status: if ping.is_ok() { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: if ping.is_ok() { "up" } else { "down" },
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
