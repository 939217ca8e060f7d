//! Core business logic for Meridian.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing and verification
//! - `identity` - Roles, registration rules, the NIN verification gate
//! - `application` - Service-request types and the review state machine
//! - `ledger` - Derivation of the outstanding-loan figure

pub mod application;
pub mod auth;
pub mod identity;
pub mod ledger;
