//! User repository for identity database operations.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use meridian_core::identity::{
    ADDRESS_NOT_PROVIDED, IdentityError, NinChange, Registration, Role, evaluate_nin_change,
    generate_account_number, normalize_address, normalize_phone,
};

use crate::entities::{applications, sea_orm_active_enums::UserRole, sessions, users};

/// Error types for identity operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Email already registered.
    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    /// The stored NIN is verified and therefore immutable.
    #[error("A verified NIN cannot be changed")]
    NinLocked,

    /// The candidate NIN is held by another identity.
    #[error("NIN is already registered to another identity")]
    NinConflict,

    /// Validation failure in submitted fields.
    #[error("{0}")]
    Validation(String),

    /// Admins cannot delete their own account.
    #[error("Cannot delete your own account")]
    SelfDeletion,

    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<IdentityError> for UserError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Validation(msg) => Self::Validation(msg),
            IdentityError::UnknownRole(role) => Self::Validation(format!("unknown role '{role}'")),
            IdentityError::NinLocked => Self::NinLocked,
            IdentityError::NinConflict => Self::NinConflict,
        }
    }
}

/// Self-service profile changes; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    /// New phone number.
    pub phone: Option<String>,
    /// New postal address.
    pub address: Option<String>,
    /// New NIN, subject to the verification gate.
    pub nin: Option<String>,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a new user from validated registration data.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::DuplicateEmail`] if the email is already
    /// registered, or a database error.
    pub async fn create(
        &self,
        registration: &Registration,
        password_hash: &str,
    ) -> Result<users::Model, UserError> {
        if self.email_exists(&registration.email).await? {
            return Err(UserError::DuplicateEmail(registration.email.clone()));
        }

        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(registration.full_name.clone()),
            email: Set(registration.email.clone()),
            password_hash: Set(password_hash.to_string()),
            phone: Set(Some(registration.phone.clone())),
            address: Set(ADDRESS_NOT_PROVIDED.to_string()),
            role: Set(UserRole::User),
            account_number: Set(generate_account_number()),
            account_balance: Set(rust_decimal::Decimal::ZERO),
            nin: Set(None),
            nin_verified: Set(false),
            profile_picture: Set(None),
            created_at: Set(now),
            last_login: Set(None),
            updated_at: Set(now),
        };

        Ok(user.insert(self.db.as_ref()).await?)
    }

    /// Finds a user by email; the lookup is case-insensitive because
    /// emails are stored lowercased.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .one(self.db.as_ref())
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(self.db.as_ref()).await
    }

    /// Finds the identity holding a NIN, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_nin(&self, nin: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Nin.eq(nin))
            .one(self.db.as_ref())
            .await
    }

    /// Lists all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }

    /// Applies a self-service profile update.
    ///
    /// Phone and address are overwritten when present; a blank value
    /// clears the phone and resets the address to its sentinel, so empty
    /// strings never reach the store. A NIN change goes
    /// through the verification gate: a verified NIN is immutable, a NIN
    /// held by another identity is rejected, and any accepted change
    /// resets the verified flag.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`], [`UserError::NinLocked`],
    /// [`UserError::NinConflict`], a validation error, or a database error.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<users::Model, UserError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        let mut active: users::ActiveModel = user.clone().into();

        if let Some(phone) = input.phone {
            active.phone = Set(normalize_phone(&phone));
        }
        if let Some(address) = input.address {
            active.address = Set(normalize_address(&address));
        }

        if let Some(candidate) = input.nin {
            let held_by_other = match self.find_by_nin(candidate.trim()).await? {
                Some(holder) => holder.id != user_id,
                None => false,
            };

            match evaluate_nin_change(
                user.nin.as_deref(),
                user.nin_verified,
                &candidate,
                held_by_other,
            )? {
                NinChange::Unchanged => {}
                NinChange::Store(nin) => {
                    active.nin = Set(Some(nin));
                    active.nin_verified = Set(false);
                }
            }
        }

        active.updated_at = Set(chrono::Utc::now().into());
        Ok(active.update(self.db.as_ref()).await?)
    }

    /// Marks a user's NIN as verified. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] if the user does not exist, or
    /// [`UserError::Validation`] if they have no NIN on record.
    pub async fn verify_nin(&self, user_id: Uuid) -> Result<users::Model, UserError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        if user.nin.is_none() {
            return Err(UserError::Validation(
                "user has no NIN on record".to_string(),
            ));
        }
        if user.nin_verified {
            return Ok(user);
        }

        let mut active: users::ActiveModel = user.into();
        active.nin_verified = Set(true);
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(active.update(self.db.as_ref()).await?)
    }

    /// Sets a user's role.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] if the user does not exist, or a
    /// database error.
    pub async fn set_role(&self, user_id: Uuid, role: Role) -> Result<users::Model, UserError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        let mut active: users::ActiveModel = user.into();
        active.role = Set(role.into());
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(active.update(self.db.as_ref()).await?)
    }

    /// Records a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn touch_last_login(&self, user_id: Uuid) -> Result<(), DbErr> {
        users::Entity::update_many()
            .col_expr(
                users::Column::LastLogin,
                sea_orm::sea_query::Expr::value(chrono::Utc::now()),
            )
            .filter(users::Column::Id.eq(user_id))
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }

    /// Stores an opaque profile-picture reference.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] if the user does not exist, or a
    /// database error.
    pub async fn set_profile_picture(
        &self,
        user_id: Uuid,
        reference: &str,
    ) -> Result<users::Model, UserError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        let mut active: users::ActiveModel = user.into();
        active.profile_picture = Set(Some(reference.to_string()));
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(active.update(self.db.as_ref()).await?)
    }

    /// Updates a user's password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn set_password_hash(&self, user_id: Uuid, password_hash: &str) -> Result<(), DbErr> {
        users::Entity::update_many()
            .col_expr(
                users::Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .col_expr(
                users::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now()),
            )
            .filter(users::Column::Id.eq(user_id))
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }

    /// Deletes a user together with their applications and sessions.
    ///
    /// Runs in a transaction; dependent rows go first and the identity row
    /// last, so either everything disappears or nothing does. Callers may
    /// never delete themselves.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::SelfDeletion`] when `caller_id == target_id`,
    /// [`UserError::NotFound`] if the target does not exist, or a database
    /// error.
    pub async fn delete_with_applications(
        &self,
        caller_id: Uuid,
        target_id: Uuid,
    ) -> Result<(), UserError> {
        if caller_id == target_id {
            return Err(UserError::SelfDeletion);
        }

        let txn = self.db.begin().await?;

        applications::Entity::delete_many()
            .filter(applications::Column::UserId.eq(target_id))
            .exec(&txn)
            .await?;

        sessions::Entity::delete_many()
            .filter(sessions::Column::UserId.eq(target_id))
            .exec(&txn)
            .await?;

        // Decisions the target made on other users' applications survive;
        // only the reviewer reference is cleared.
        applications::Entity::update_many()
            .col_expr(
                applications::Column::DecidedBy,
                sea_orm::sea_query::Expr::value(None::<Uuid>),
            )
            .filter(applications::Column::DecidedBy.eq(target_id))
            .exec(&txn)
            .await?;

        let result = users::Entity::delete_by_id(target_id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(UserError::NotFound(target_id));
        }

        txn.commit().await?;
        Ok(())
    }
}
