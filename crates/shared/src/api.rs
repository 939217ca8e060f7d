//! Request and response payload types for the HTTP boundary.
//!
//! These are plain serde types; all business rules live in `meridian-core`
//! and the repositories. Password fields are never echoed back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Registration request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Applicant full name.
    pub full_name: String,
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
    /// Contact phone number.
    pub phone: String,
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
}

/// Identity as exposed to callers.
///
/// `outstanding_loan_amount` is derived state: it is recomputed from
/// approval history on every read, never stored authoritatively.
#[derive(Debug, Clone, Serialize)]
pub struct IdentityResponse {
    /// Identity ID.
    pub id: Uuid,
    /// Full name.
    pub full_name: String,
    /// Email (stored lowercased).
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal address; defaults to a sentinel when never provided.
    pub address: String,
    /// Role: "user" or "admin".
    pub role: String,
    /// Generated 10-digit account number.
    pub account_number: String,
    /// Account balance.
    pub account_balance: Decimal,
    /// Current outstanding-loan figure (derived).
    pub outstanding_loan_amount: Decimal,
    /// National Identification Number, if provided.
    pub nin: Option<String>,
    /// Whether an admin has verified the NIN.
    pub nin_verified: bool,
    /// Opaque profile-picture reference.
    pub profile_picture: Option<String>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login: Option<DateTime<Utc>>,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Opaque session token; expires 24h after creation.
    pub token: String,
    /// The authenticated identity.
    pub identity: IdentityResponse,
}

/// Self-service profile update. Only the provided fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    /// New phone number.
    pub phone: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New NIN; rejected if the stored NIN is verified and differs, or if
    /// another identity already holds it.
    pub nin: Option<String>,
}

/// Profile-picture reference update. Upload mechanics live elsewhere; the
/// core only stores the opaque path.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePictureRequest {
    /// Opaque storage path, e.g. `/uploads/abc.png`.
    pub path: String,
}

/// Service-request submission payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitApplicationRequest {
    /// Applicant full name (captured at submission time).
    pub full_name: String,
    /// Applicant email.
    pub email: String,
    /// Applicant phone.
    pub phone: Option<String>,
    /// Application kind: "Loan", "Investment", or "Forex".
    #[serde(rename = "type")]
    pub kind: String,
    /// Type-tagged details payload; validated loosely per kind.
    #[serde(default)]
    pub details: serde_json::Value,
}

/// Application as exposed to callers.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    /// Application ID.
    pub id: Uuid,
    /// Owning identity, if the submitter was authenticated.
    pub owner_id: Option<Uuid>,
    /// Applicant full name (as submitted).
    pub full_name: String,
    /// Applicant email (as submitted).
    pub email: String,
    /// Applicant phone (as submitted).
    pub phone: Option<String>,
    /// Application kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Lifecycle status: "Pending", "Approved", or "Rejected".
    pub status: String,
    /// Details payload as submitted (plus any approval-time amount override).
    pub details: serde_json::Value,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Approval time; set only on transition to Approved.
    pub approved_at: Option<DateTime<Utc>>,
}

/// Admin review action on an application.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationActionRequest {
    /// "approve" or "reject".
    pub action: String,
    /// Optional approved-amount override (Loan approvals only).
    pub amount: Option<Decimal>,
}

/// Admin role change.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRoleRequest {
    /// New role: "user" or "admin".
    pub role: String,
}

/// Admin user listing row: identity enriched with loan metadata when a
/// loan is outstanding.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserRow {
    /// The identity.
    #[serde(flatten)]
    pub identity: IdentityResponse,
    /// Approval time of the loan backing the outstanding figure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_approved_at: Option<DateTime<Utc>>,
    /// Duration field of that loan's details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_duration: Option<String>,
}

/// Contact-form submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    /// Sender name.
    pub name: Option<String>,
    /// Sender email.
    pub email: String,
    /// Message subject.
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
}

/// Forgot-password request.
#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Account email. The response is identical whether or not it exists.
    pub email: String,
}

/// Batched site-content update: key to value.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentUpdateRequest {
    /// Content entries to upsert.
    pub updates: BTreeMap<String, String>,
}

/// Generic message response.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
