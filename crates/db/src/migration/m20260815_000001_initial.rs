//! Initial schema: identities, applications, and site content.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
DROP TABLE IF EXISTS site_content CASCADE;
DROP TABLE IF EXISTS applications CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TYPE IF EXISTS application_status;
DROP TYPE IF EXISTS application_type;
DROP TYPE IF EXISTS user_role;
",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
CREATE TYPE user_role AS ENUM ('user', 'admin');
CREATE TYPE application_type AS ENUM ('loan', 'investment', 'forex');
CREATE TYPE application_status AS ENUM ('pending', 'approved', 'rejected');

CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    full_name TEXT NOT NULL,
    email VARCHAR(255) NOT NULL,
    password_hash TEXT NOT NULL,
    phone VARCHAR(32),
    address TEXT NOT NULL DEFAULT 'Not Provided',
    role user_role NOT NULL DEFAULT 'user',
    account_number VARCHAR(10) NOT NULL,
    account_balance NUMERIC(20, 2) NOT NULL DEFAULT 0,
    nin VARCHAR(32),
    nin_verified BOOLEAN NOT NULL DEFAULT FALSE,
    profile_picture TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    last_login TIMESTAMPTZ,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Emails are stored lowercased; the unique index enforces it either way.
CREATE UNIQUE INDEX idx_users_email ON users(lower(email));
CREATE UNIQUE INDEX idx_users_account_number ON users(account_number);

-- A verified or held NIN belongs to exactly one identity.
CREATE UNIQUE INDEX idx_users_nin ON users(nin) WHERE nin IS NOT NULL;

CREATE TABLE applications (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID REFERENCES users(id),
    full_name TEXT NOT NULL,
    email VARCHAR(255) NOT NULL,
    phone VARCHAR(32),
    application_type application_type NOT NULL,
    status application_status NOT NULL DEFAULT 'pending',
    details JSONB NOT NULL DEFAULT '{}'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    approved_at TIMESTAMPTZ,
    decided_by UUID REFERENCES users(id),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Index for an identity's application history
CREATE INDEX idx_applications_owner ON applications(user_id, created_at DESC);

-- Index for the admin review queue
CREATE INDEX idx_applications_status ON applications(status, created_at DESC);

-- Index for ledger reconciliation (most recently approved loan per identity)
CREATE INDEX idx_applications_approved_loans
    ON applications(user_id, approved_at DESC)
    WHERE application_type = 'loan' AND status = 'approved';

CREATE TABLE site_content (
    key VARCHAR(128) PRIMARY KEY,
    value TEXT NOT NULL,
    content_type VARCHAR(32) NOT NULL DEFAULT 'text',
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";
