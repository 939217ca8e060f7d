//! Database seeder for Meridian development and testing.
//!
//! Seeds the bootstrap admin identity and the default site copy for
//! local development. Safe to re-run: existing rows are left alone.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use meridian_core::auth::hash_password;
use meridian_core::identity::{ADDRESS_NOT_PROVIDED, generate_account_number};
use meridian_db::entities::{sea_orm_active_enums::UserRole, users};
use meridian_db::{ContentRepository, UserRepository};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = Arc::new(
        meridian_db::connect(&database_url)
            .await
            .expect("Failed to connect to database"),
    );

    println!("Seeding admin identity...");
    seed_admin(&db).await;

    println!("Seeding site content...");
    seed_site_content(&db).await;

    println!("Seeding complete!");
}

/// Seeds the bootstrap admin. Email and password come from the
/// environment so no credentials live in the repository.
async fn seed_admin(db: &Arc<DatabaseConnection>) {
    let email = std::env::var("SEED_ADMIN_EMAIL")
        .unwrap_or_else(|_| "admin@meridian.local".to_string())
        .to_lowercase();
    let password =
        std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "change-me-now".to_string());

    let repo = UserRepository::new(db.clone());
    match repo.find_by_email(&email).await {
        Ok(Some(_)) => {
            println!("  Admin already exists, skipping...");
            return;
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Failed to check for existing admin: {e}");
            return;
        }
    }

    let password_hash = hash_password(&password).expect("Failed to hash admin password");
    let now = Utc::now().into();
    let admin = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        full_name: Set("Meridian Admin".to_string()),
        email: Set(email.clone()),
        password_hash: Set(password_hash),
        phone: Set(None),
        address: Set(ADDRESS_NOT_PROVIDED.to_string()),
        role: Set(UserRole::Admin),
        account_number: Set(generate_account_number()),
        account_balance: Set(rust_decimal::Decimal::ZERO),
        nin: Set(None),
        nin_verified: Set(false),
        profile_picture: Set(None),
        created_at: Set(now),
        last_login: Set(None),
        updated_at: Set(now),
    };

    if let Err(e) = admin.insert(db.as_ref()).await {
        eprintln!("Failed to insert admin: {e}");
    } else {
        println!("  Created admin: {email}");
    }
}

/// Seeds the default site copy. Existing keys are not overwritten.
async fn seed_site_content(db: &Arc<DatabaseConnection>) {
    let defaults = [
        ("hero_title", "Banking built around you"),
        (
            "hero_subtitle",
            "Loans, investments, and forex guidance from one trusted partner.",
        ),
        ("about_text", "Meridian Capital has served customers since 2012."),
        ("contact_phone", "+1 555 0100"),
        ("contact_email", "support@meridian.local"),
    ];

    let repo = ContentRepository::new(db.clone());
    let mut inserted = 0;

    for (key, value) in defaults {
        match repo.get(key).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                if let Err(e) = repo.upsert(key, value).await {
                    eprintln!("Failed to seed content {key}: {e}");
                } else {
                    inserted += 1;
                }
            }
            Err(e) => eprintln!("Failed to check content {key}: {e}"),
        }
    }

    println!("  Inserted {inserted} content entries");
}
