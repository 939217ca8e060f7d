//! Session repository for bearer-token database operations.

use std::sync::Arc;

use rand::RngCore;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::entities::sessions;

/// Number of random bytes behind each bearer token.
const TOKEN_BYTES: usize = 32;

/// Session repository for CRUD operations.
///
/// Tokens are opaque random strings; only their SHA-256 hash touches the
/// database, so a leaked table cannot be replayed as credentials.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    db: Arc<DatabaseConnection>,
}

impl SessionRepository {
    /// Creates a new session repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Hashes a bearer token for storage or lookup.
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Generates a fresh opaque bearer token.
    #[must_use]
    pub fn generate_token() -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        base64_url::encode(&bytes)
    }

    /// Creates a new session and returns the token alongside the stored
    /// row. The token is handed to the caller exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        ttl: chrono::Duration,
    ) -> Result<(String, sessions::Model), DbErr> {
        let token = Self::generate_token();
        let now = chrono::Utc::now();

        let session = sessions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            token_hash: Set(Self::hash_token(&token)),
            expires_at: Set((now + ttl).into()),
            created_at: Set(now.into()),
        };

        let model = session.insert(self.db.as_ref()).await?;
        Ok((token, model))
    }

    /// Resolves a bearer token to its live session, if any.
    ///
    /// Expired sessions are treated as absent; expiry is a hard cutoff
    /// fixed at creation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn resolve(&self, token: &str) -> Result<Option<sessions::Model>, DbErr> {
        sessions::Entity::find()
            .filter(sessions::Column::TokenHash.eq(Self::hash_token(token)))
            .filter(sessions::Column::ExpiresAt.gt(chrono::Utc::now()))
            .one(self.db.as_ref())
            .await
    }

    /// Revokes the session behind a token. Idempotent; revoking an
    /// unknown or already-revoked token reports `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn revoke(&self, token: &str) -> Result<bool, DbErr> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::TokenHash.eq(Self::hash_token(token)))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Revokes all sessions for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, DbErr> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }

    /// Cleans up expired sessions (for maintenance).
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn cleanup_expired(&self) -> Result<u64, DbErr> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::ExpiresAt.lt(chrono::Utc::now()))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_and_url_safe() {
        let a = SessionRepository::generate_token();
        let b = SessionRepository::generate_token();
        assert_ne!(a, b);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_token_hash_is_stable_hex() {
        let hash = SessionRepository::hash_token("abc");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, SessionRepository::hash_token("abc"));
        assert_ne!(hash, SessionRepository::hash_token("abd"));
    }
}
