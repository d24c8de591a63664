//! Billing record DTOs
//!
//! Field names follow the form keys the existing web client posts
//! (`Engg_Name`, `Bill_No`, ...). Currency fields travel as JSON numbers.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use srbilling_core::models::{BillingPo, BillingPoDropDown};

/// Billing record as sent and received over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingPoRecord {
    /// Identifier; ignored on submit, required on update
    #[serde(default)]
    pub id: i32,

    /// Creation time; defaults to now on submit, kept on update
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,

    /// Engineer name
    #[serde(rename = "Engg_Name", default)]
    pub engg_name: Option<String>,

    /// Supplier
    #[serde(rename = "Supplier", default)]
    pub supplier: Option<String>,

    /// Bill number
    #[serde(rename = "Bill_No")]
    pub bill_no: String,

    /// Bill date
    #[serde(rename = "Bill_Date", default)]
    pub bill_date: Option<NaiveDate>,

    /// Customer name
    #[serde(rename = "Customer_Name", default)]
    pub customer_name: Option<String>,

    /// Customer purchase order number
    #[serde(rename = "Customer_Po_No", default)]
    pub customer_po_no: Option<String>,

    /// Customer purchase order date
    #[serde(rename = "Customer_Po_Date", default)]
    pub customer_po_date: Option<NaiveDate>,

    /// Item description
    #[serde(rename = "Item_Description", default)]
    pub item_description: Option<String>,

    /// Billed quantity
    #[serde(rename = "Billed_Qty", default)]
    pub billed_qty: Option<i32>,

    /// Unit
    #[serde(default)]
    pub unit: Option<String>,

    /// Net value
    #[serde(rename = "Net_Value", default, with = "rust_decimal::serde::float_option")]
    pub net_value: Option<Decimal>,

    /// Central GST
    #[serde(rename = "CGST", default, with = "rust_decimal::serde::float_option")]
    pub cgst: Option<Decimal>,

    /// Integrated GST
    #[serde(rename = "IGST", default, with = "rust_decimal::serde::float_option")]
    pub igst: Option<Decimal>,

    /// Total tax
    #[serde(rename = "Total_tax", default, with = "rust_decimal::serde::float_option")]
    pub total_tax: Option<Decimal>,

    /// Gross amount
    #[serde(rename = "Gross", default, with = "rust_decimal::serde::float_option")]
    pub gross: Option<Decimal>,

    /// Dispatch-through text
    #[serde(rename = "Dispatch_Through", default)]
    pub dispatch_through: Option<String>,
}

impl From<BillingPoRecord> for BillingPo {
    fn from(r: BillingPoRecord) -> Self {
        BillingPo {
            id: r.id,
            timestamp: r.timestamp,
            engg_name: r.engg_name,
            supplier: r.supplier,
            bill_no: r.bill_no,
            bill_date: r.bill_date,
            customer_name: r.customer_name,
            customer_po_no: r.customer_po_no,
            customer_po_date: r.customer_po_date,
            item_description: r.item_description,
            billed_qty: r.billed_qty,
            unit: r.unit,
            net_value: r.net_value,
            cgst: r.cgst,
            igst: r.igst,
            total_tax: r.total_tax,
            gross: r.gross,
            dispatch_through: r.dispatch_through,
        }
    }
}

impl From<BillingPo> for BillingPoRecord {
    fn from(po: BillingPo) -> Self {
        Self {
            id: po.id,
            timestamp: po.timestamp,
            engg_name: po.engg_name,
            supplier: po.supplier,
            bill_no: po.bill_no,
            bill_date: po.bill_date,
            customer_name: po.customer_name,
            customer_po_no: po.customer_po_no,
            customer_po_date: po.customer_po_date,
            item_description: po.item_description,
            billed_qty: po.billed_qty,
            unit: po.unit,
            net_value: po.net_value,
            cgst: po.cgst,
            igst: po.igst,
            total_tax: po.total_tax,
            gross: po.gross,
            dispatch_through: po.dispatch_through,
        }
    }
}

/// Dropdown combination as sent to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropDownResponse {
    /// Engineer name
    #[serde(rename = "Engg_Name")]
    pub engg_name: Option<String>,
    /// Supplier
    #[serde(rename = "Supplier")]
    pub supplier: Option<String>,
    /// Customer name
    #[serde(rename = "Customer_Name")]
    pub customer_name: Option<String>,
    /// Unit
    pub unit: Option<String>,
}

impl From<BillingPoDropDown> for DropDownResponse {
    fn from(dd: BillingPoDropDown) -> Self {
        Self {
            engg_name: dd.engg_name,
            supplier: dd.supplier,
            customer_name: dd.customer_name,
            unit: dd.unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_deserialize_client_payload() {
        let payload = json!({
            "Engg_Name": "Ravi",
            "Supplier": "Acme",
            "Bill_No": "BN-100",
            "Bill_Date": "2024-04-01",
            "Customer_Name": "Globex",
            "Billed_Qty": 5,
            "unit": "Nos",
            "Net_Value": 1000.00,
            "CGST": 90.5,
            "Gross": 1180
        });

        let record: BillingPoRecord = serde_json::from_value(payload).unwrap();
        assert_eq!(record.id, 0);
        assert_eq!(record.bill_no, "BN-100");
        assert_eq!(record.bill_date, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(record.billed_qty, Some(5));
        assert_eq!(record.net_value, Some(dec!(1000)));
        assert_eq!(record.cgst, Some(dec!(90.5)));
        assert_eq!(record.gross, Some(dec!(1180)));
        assert_eq!(record.igst, None);
        assert_eq!(record.timestamp, None);
    }

    #[test]
    fn test_missing_bill_no_rejected() {
        let result: Result<BillingPoRecord, _> =
            serde_json::from_value(json!({ "Engg_Name": "Ravi" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_uses_client_keys() {
        let po = BillingPo {
            id: 3,
            net_value: Some(dec!(1000.00)),
            billed_qty: Some(5),
            ..BillingPo::new("BN-100")
        };

        let json = serde_json::to_value(BillingPoRecord::from(po)).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["Bill_No"], "BN-100");
        assert_eq!(json["Billed_Qty"], 5);
        assert_eq!(json["Net_Value"], 1000.0);
        assert!(json["CGST"].is_null());
        assert_eq!(json.as_object().unwrap().len(), 18);
    }

    #[test]
    fn test_drop_down_keys() {
        let dd = DropDownResponse::from(BillingPoDropDown {
            engg_name: Some("Ravi".to_string()),
            supplier: None,
            customer_name: Some("Globex".to_string()),
            unit: Some("Nos".to_string()),
        });

        let json = serde_json::to_value(dd).unwrap();
        assert_eq!(
            json,
            json!({
                "Engg_Name": "Ravi",
                "Supplier": null,
                "Customer_Name": "Globex",
                "unit": "Nos"
            })
        );
    }
}
