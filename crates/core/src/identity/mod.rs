//! Identity domain rules.
//!
//! This module defines:
//! - The closed role set consumed by the authorization guard
//! - Registration input validation and normalization
//! - The one-way NIN verification gate
//! - Account-number generation

mod account;
mod error;
mod nin;
mod profile;
mod registration;
mod role;

pub use account::generate_account_number;
pub use error::IdentityError;
pub use nin::{NinChange, evaluate_nin_change};
pub use profile::{normalize_address, normalize_phone};
pub use registration::{NewIdentity, Registration};
pub use role::Role;

/// Sentinel stored when a user has never provided an address.
pub const ADDRESS_NOT_PROVIDED: &str = "Not Provided";
