//! Repository implementations
//!
//! Concrete implementations of the repository traits defined in
//! srbilling-core, using sqlx for PostgreSQL access.

pub mod billing_po_repo;

pub use billing_po_repo::PgBillingPoRepository;
