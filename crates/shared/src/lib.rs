//! Shared types, errors, and configuration for Meridian.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error taxonomy
//! - Configuration management
//! - API payload types for the HTTP boundary
//! - Outbound email relay

pub mod api;
pub mod config;
pub mod email;
pub mod error;

pub use config::AppConfig;
pub use email::{EmailError, EmailService};
pub use error::{AppError, AppResult};
