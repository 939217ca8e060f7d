//! Sessions migration for bearer-token management.
//!
//! Creates the sessions table for tracking active login sessions.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SESSIONS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS sessions CASCADE;")
            .await?;
        Ok(())
    }
}

const SESSIONS_SQL: &str = r"
-- Sessions table; only token hashes are stored
CREATE TABLE sessions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    token_hash VARCHAR(64) NOT NULL,
    expires_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expires_future CHECK (expires_at > created_at)
);

-- Index for token lookup (most common operation)
CREATE UNIQUE INDEX idx_sessions_token_hash ON sessions(token_hash);

-- Index for revoking all of a user's sessions
CREATE INDEX idx_sessions_user ON sessions(user_id, created_at DESC);

-- Index for cleanup of expired sessions
CREATE INDEX idx_sessions_expires ON sessions(expires_at);
";
