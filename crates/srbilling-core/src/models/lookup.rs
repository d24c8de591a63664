//! Lookup tables
//!
//! Each lookup table holds the permissible values for one column of the
//! billing record. Only `customername` and `unit` are enforced by foreign keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference-value table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupTable {
    /// `customername(customer_name)`
    CustomerName,
    /// `unit(unit_name)`
    Unit,
    /// `enggname(engg_name)`
    EnggName,
    /// `supplier(supplier_name)`
    Supplier,
}

impl LookupTable {
    /// All lookup tables, in creation order
    pub const ALL: [LookupTable; 4] = [
        LookupTable::CustomerName,
        LookupTable::Unit,
        LookupTable::EnggName,
        LookupTable::Supplier,
    ];

    /// SQL table name
    pub fn table_name(&self) -> &'static str {
        match self {
            LookupTable::CustomerName => "customername",
            LookupTable::Unit => "unit",
            LookupTable::EnggName => "enggname",
            LookupTable::Supplier => "supplier",
        }
    }

    /// The single value column of the table
    pub fn column_name(&self) -> &'static str {
        match self {
            LookupTable::CustomerName => "customer_name",
            LookupTable::Unit => "unit_name",
            LookupTable::EnggName => "engg_name",
            LookupTable::Supplier => "supplier_name",
        }
    }

    /// Declared width of the value column
    pub fn column_width(&self) -> u32 {
        match self {
            LookupTable::CustomerName => 255,
            _ => 100,
        }
    }

    /// Parse from a table name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "customername" => Some(LookupTable::CustomerName),
            "unit" => Some(LookupTable::Unit),
            "enggname" => Some(LookupTable::EnggName),
            "supplier" => Some(LookupTable::Supplier),
            _ => None,
        }
    }
}

impl fmt::Display for LookupTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
