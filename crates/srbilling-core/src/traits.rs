//! Common traits for repositories
//!
//! The HTTP layer is written against these traits and receives a concrete
//! implementation at startup, so tests can substitute an in-memory double.

use crate::error::AppError;
use crate::models::{BillingPo, BillingPoDropDown, LookupTable};
use async_trait::async_trait;

/// Billing record repository
#[async_trait]
pub trait BillingPoRepository: Send + Sync {
    /// Distinct dropdown combinations.
    ///
    /// An empty table is reported as `AppError::NoRows`, not as an empty list.
    async fn fetch_drop_down(&self) -> Result<Vec<BillingPoDropDown>, AppError>;

    /// Insert a new record and return it as stored
    async fn submit(&self, record: &BillingPo) -> Result<BillingPo, AppError>;

    /// Every stored record, ordered by identifier
    async fn fetch_all(&self) -> Result<Vec<BillingPo>, AppError>;

    /// Overwrite every field of the record with `record.id`, except that a
    /// `None` timestamp keeps the stored one.
    ///
    /// Returns the number of affected rows; zero is not an error.
    async fn update(&self, record: &BillingPo) -> Result<u64, AppError>;

    /// Delete by identifier inside a transaction.
    ///
    /// Returns the number of affected rows; zero is not an error.
    async fn delete(&self, id: i32) -> Result<u64, AppError>;
}

/// Lookup table repository
#[async_trait]
pub trait LookupRepository: Send + Sync {
    /// All values of one lookup table, sorted
    async fn list_lookup_values(&self, table: LookupTable) -> Result<Vec<String>, AppError>;

    /// Register a value; returns `false` if it was already present
    async fn add_lookup_value(&self, table: LookupTable, value: &str) -> Result<bool, AppError>;
}
