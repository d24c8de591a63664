//! Domain models for SR Billing
//!
//! This module contains the billing record, its dropdown projection, and the
//! lookup tables that constrain its reference columns.

pub mod billing_po;
pub mod lookup;

pub use billing_po::{BillingPo, BillingPoDropDown};
pub use lookup::LookupTable;
