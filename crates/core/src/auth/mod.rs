//! Authentication primitives.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - The minimum-length password policy

mod password;

pub use password::{MIN_PASSWORD_LEN, PasswordError, hash_password, validate_password, verify_password};
