//! Billing record model
//!
//! A `BillingPo` is one submitted bill against a customer purchase order.
//! Nullable columns are `Option` so a stored row reads back exactly as written.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Billing record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BillingPo {
    /// Server-assigned identifier, ignored on submit
    pub id: i32,

    /// Creation time in the configured zone (wall clock, no offset)
    pub timestamp: Option<NaiveDateTime>,

    /// Engineer responsible for the bill
    pub engg_name: Option<String>,

    /// Supplier
    pub supplier: Option<String>,

    /// Bill number, unique across all records
    pub bill_no: String,

    pub bill_date: Option<NaiveDate>,

    /// Must exist in the `customername` lookup table
    pub customer_name: Option<String>,

    pub customer_po_no: Option<String>,

    pub customer_po_date: Option<NaiveDate>,

    pub item_description: Option<String>,

    pub billed_qty: Option<i32>,

    /// Must exist in the `unit` lookup table
    pub unit: Option<String>,

    pub net_value: Option<Decimal>,

    pub cgst: Option<Decimal>,

    pub igst: Option<Decimal>,

    pub total_tax: Option<Decimal>,

    pub gross: Option<Decimal>,

    pub dispatch_through: Option<String>,
}

impl BillingPo {
    /// Create an otherwise empty record with the given bill number
    pub fn new(bill_no: impl Into<String>) -> Self {
        Self {
            bill_no: bill_no.into(),
            ..Default::default()
        }
    }

    /// The dropdown projection of this record
    pub fn drop_down(&self) -> BillingPoDropDown {
        BillingPoDropDown {
            engg_name: self.engg_name.clone(),
            supplier: self.supplier.clone(),
            customer_name: self.customer_name.clone(),
            unit: self.unit.clone(),
        }
    }
}

/// Distinct combination of the four filterable attributes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BillingPoDropDown {
    pub engg_name: Option<String>,
    pub supplier: Option<String>,
    pub customer_name: Option<String>,
    pub unit: Option<String>,
}
