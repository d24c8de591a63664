//! Billing record query layer
//!
//! One parameterized statement per operation, no retries. Empty results are
//! returned as empty vectors; deciding whether that is an error is left to the
//! repository.

use crate::error::classify;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use srbilling_core::{
    models::{BillingPo, BillingPoDropDown, LookupTable},
    AppResult,
};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, info, instrument};

/// Columns of the billing table in declaration order
pub const BILLING_COLUMNS: &str = "id, timestamp, engg_name, supplier, bill_no, bill_date, \
     customer_name, customer_po_no, customer_po_date, item_description, billed_qty, unit, \
     net_value, cgst, igst, total_tax, gross, dispatch_through";

const SELECT_DROP_DOWN: &str = r#"
    SELECT DISTINCT engg_name, supplier, customer_name, unit
    FROM billingposubmitteddata
    ORDER BY engg_name, supplier, customer_name, unit
"#;

const INSERT_BILLING_PO: &str = r#"
    INSERT INTO billingposubmitteddata (
        timestamp, engg_name, supplier, bill_no, bill_date, customer_name,
        customer_po_no, customer_po_date, item_description, billed_qty, unit,
        net_value, cgst, igst, total_tax, gross, dispatch_through
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
    RETURNING
        id, timestamp, engg_name, supplier, bill_no, bill_date,
        customer_name, customer_po_no, customer_po_date, item_description, billed_qty, unit,
        net_value, cgst, igst, total_tax, gross, dispatch_through
"#;

const UPDATE_BILLING_PO: &str = r#"
    UPDATE billingposubmitteddata SET
        timestamp = COALESCE($1, timestamp), engg_name = $2, supplier = $3, bill_no = $4,
        bill_date = $5, customer_name = $6, customer_po_no = $7, customer_po_date = $8,
        item_description = $9, billed_qty = $10, unit = $11, net_value = $12, cgst = $13,
        igst = $14, total_tax = $15, gross = $16, dispatch_through = $17
    WHERE id = $18
"#;

/// Delete statement used inside the repository's transaction
pub const DELETE_BILLING_PO: &str = "DELETE FROM billingposubmitteddata WHERE id = $1";

/// Database row representation of a billing record
#[derive(Debug, FromRow)]
struct BillingPoRow {
    id: i32,
    timestamp: Option<NaiveDateTime>,
    engg_name: Option<String>,
    supplier: Option<String>,
    bill_no: String,
    bill_date: Option<NaiveDate>,
    customer_name: Option<String>,
    customer_po_no: Option<String>,
    customer_po_date: Option<NaiveDate>,
    item_description: Option<String>,
    billed_qty: Option<i32>,
    unit: Option<String>,
    net_value: Option<Decimal>,
    cgst: Option<Decimal>,
    igst: Option<Decimal>,
    total_tax: Option<Decimal>,
    gross: Option<Decimal>,
    dispatch_through: Option<String>,
}

impl From<BillingPoRow> for BillingPo {
    fn from(row: BillingPoRow) -> Self {
        BillingPo {
            id: row.id,
            timestamp: row.timestamp,
            engg_name: row.engg_name,
            supplier: row.supplier,
            bill_no: row.bill_no,
            bill_date: row.bill_date,
            customer_name: row.customer_name,
            customer_po_no: row.customer_po_no,
            customer_po_date: row.customer_po_date,
            item_description: row.item_description,
            billed_qty: row.billed_qty,
            unit: row.unit,
            net_value: row.net_value,
            cgst: row.cgst,
            igst: row.igst,
            total_tax: row.total_tax,
            gross: row.gross,
            dispatch_through: row.dispatch_through,
        }
    }
}

#[derive(Debug, FromRow)]
struct DropDownRow {
    engg_name: Option<String>,
    supplier: Option<String>,
    customer_name: Option<String>,
    unit: Option<String>,
}

impl From<DropDownRow> for BillingPoDropDown {
    fn from(row: DropDownRow) -> Self {
        BillingPoDropDown {
            engg_name: row.engg_name,
            supplier: row.supplier,
            customer_name: row.customer_name,
            unit: row.unit,
        }
    }
}

/// Parameterized queries over the billing table
#[derive(Debug, Clone)]
pub struct BillingPoQuery {
    pool: PgPool,
    tz: Tz,
}

impl BillingPoQuery {
    /// Create a query layer stamping new records in `tz`
    pub fn new(pool: PgPool, tz: Tz) -> Self {
        Self { pool, tz }
    }

    /// The underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Current wall-clock time in the configured zone
    pub fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }

    /// Distinct dropdown combinations; may be empty
    #[instrument(skip(self))]
    pub async fn fetch_drop_down(&self) -> AppResult<Vec<BillingPoDropDown>> {
        let rows = sqlx::query_as::<sqlx::Postgres, DropDownRow>(SELECT_DROP_DOWN)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error fetching dropdown values: {}", e);
                classify(e, "Failed to fetch dropdown values")
            })?;

        debug!("Fetched {} dropdown combinations", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert one record; the identifier is generated by the store
    #[instrument(skip(self, data), fields(bill_no = %data.bill_no))]
    pub async fn submit(&self, data: &BillingPo) -> AppResult<BillingPo> {
        let timestamp = data.timestamp.unwrap_or_else(|| self.now());

        let row = sqlx::query_as::<sqlx::Postgres, BillingPoRow>(INSERT_BILLING_PO)
            .bind(timestamp)
            .bind(&data.engg_name)
            .bind(&data.supplier)
            .bind(&data.bill_no)
            .bind(data.bill_date)
            .bind(&data.customer_name)
            .bind(&data.customer_po_no)
            .bind(data.customer_po_date)
            .bind(&data.item_description)
            .bind(data.billed_qty)
            .bind(&data.unit)
            .bind(data.net_value)
            .bind(data.cgst)
            .bind(data.igst)
            .bind(data.total_tax)
            .bind(data.gross)
            .bind(&data.dispatch_through)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to insert billing record {}: {}", data.bill_no, e);
                classify(e, &format!("Failed to submit bill {}", data.bill_no))
            })?;

        info!(id = row.id, "Billing record submitted");
        Ok(row.into())
    }

    /// Every record, ordered by identifier; may be empty
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> AppResult<Vec<BillingPo>> {
        let sql = format!(
            "SELECT {} FROM billingposubmitteddata ORDER BY id",
            BILLING_COLUMNS
        );

        let rows = sqlx::query_as::<sqlx::Postgres, BillingPoRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to fetch billing records: {}", e);
                classify(e, "Failed to fetch billing records")
            })?;

        info!("Fetched {} billing records", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Full-row update keyed by `data.id`, returning the affected row count
    #[instrument(skip(self, data), fields(id = data.id))]
    pub async fn update(&self, data: &BillingPo) -> AppResult<u64> {
        let result = sqlx::query(UPDATE_BILLING_PO)
            .bind(data.timestamp)
            .bind(&data.engg_name)
            .bind(&data.supplier)
            .bind(&data.bill_no)
            .bind(data.bill_date)
            .bind(&data.customer_name)
            .bind(&data.customer_po_no)
            .bind(data.customer_po_date)
            .bind(&data.item_description)
            .bind(data.billed_qty)
            .bind(&data.unit)
            .bind(data.net_value)
            .bind(data.cgst)
            .bind(data.igst)
            .bind(data.total_tax)
            .bind(data.gross)
            .bind(&data.dispatch_through)
            .bind(data.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to update billing record {}: {}", data.id, e);
                classify(e, &format!("Failed to update billing record {}", data.id))
            })?;

        debug!(rows = result.rows_affected(), "Billing record update executed");
        Ok(result.rows_affected())
    }

    /// Values of one lookup table, sorted
    #[instrument(skip(self))]
    pub async fn list_lookup_values(&self, table: LookupTable) -> AppResult<Vec<String>> {
        let sql = format!(
            "SELECT {col} FROM {table} ORDER BY {col}",
            col = table.column_name(),
            table = table.table_name()
        );

        sqlx::query_scalar::<sqlx::Postgres, String>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list {} values: {}", table, e);
                classify(e, &format!("Failed to list {} values", table))
            })
    }

    /// Insert a lookup value unless present; returns whether a row was added
    #[instrument(skip(self))]
    pub async fn add_lookup_value(&self, table: LookupTable, value: &str) -> AppResult<bool> {
        let sql = format!(
            "INSERT INTO {table} ({col}) VALUES ($1) ON CONFLICT ({col}) DO NOTHING",
            col = table.column_name(),
            table = table.table_name()
        );

        let result = sqlx::query(&sql)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to add {} value: {}", table, e);
                classify(e, &format!("Failed to add {} value", table))
            })?;

        Ok(result.rows_affected() == 1)
    }
}
