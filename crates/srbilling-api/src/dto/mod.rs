//! Data Transfer Objects (DTOs) for API requests and responses

pub mod billing_po;
pub mod common;
pub mod lookup;

pub use billing_po::*;
pub use common::*;
pub use lookup::*;
