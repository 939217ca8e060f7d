//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod application;
pub mod content;
pub mod session;
pub mod user;

pub use application::{ApplicationError, ApplicationRepository};
pub use content::ContentRepository;
pub use session::SessionRepository;
pub use user::{UpdateProfileInput, UserError, UserRepository};
