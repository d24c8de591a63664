//! API layer for SR Billing
//!
//! HTTP handlers for the billing record and lookup endpoints. Handlers only
//! see the repository traits; the concrete store is registered by the binary.

#![forbid(unsafe_code)]
#![warn(clippy::all, missing_docs)]

pub mod dto;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::ApiResponse;

// Re-export handler configuration functions
pub use handlers::{configure_billing_po, configure_lookups};
