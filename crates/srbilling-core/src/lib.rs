//! SR Billing Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the SR Billing backend. It includes:
//!
//! - Domain models (BillingPo, dropdown projection, lookup tables)
//! - The repository trait the HTTP layer is written against
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
