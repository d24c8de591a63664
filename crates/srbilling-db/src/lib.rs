//! SR Billing Database Layer
//!
//! This crate provides PostgreSQL access for the SR Billing backend:
//!
//! - Connection pool management with sqlx
//! - Idempotent schema creation
//! - The parameterized query layer for billing records
//! - Repository implementations built on top of it

pub mod error;
pub mod pool;
pub mod query;
pub mod repositories;
pub mod schema;

pub use pool::{create_pool, create_pool_with_config};
pub use query::BillingPoQuery;
pub use repositories::*;
pub use schema::init_schema;

// Re-export commonly used types
pub use srbilling_core::{AppError, AppResult};
pub use sqlx::{PgPool, Postgres, Transaction};
