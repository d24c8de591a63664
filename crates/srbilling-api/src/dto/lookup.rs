//! Lookup table DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /lookup/{table}`
#[derive(Debug, Clone, Deserialize)]
pub struct LookupValueRequest {
    /// Value to register
    pub value: String,
}

/// Values of one lookup table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupValuesResponse {
    /// Table name
    pub table: String,
    /// Registered values, sorted
    pub values: Vec<String>,
}

/// Result of registering a value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupValueAdded {
    /// Table name
    pub table: String,
    /// The registered value
    pub value: String,
    /// False when the value already existed
    pub created: bool,
}
