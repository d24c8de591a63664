//! Billing record repository implementation
//!
//! Thin pass-through over [`BillingPoQuery`]. It adds two behaviors: an empty
//! dropdown is reported as `AppError::NoRows`, and deletes run inside an
//! explicit transaction.

use crate::error::{classify, transaction};
use crate::query::{BillingPoQuery, DELETE_BILLING_PO};
use async_trait::async_trait;
use srbilling_core::{
    models::{BillingPo, BillingPoDropDown, LookupTable},
    traits::{BillingPoRepository, LookupRepository},
    AppError, AppResult,
};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, error, info, instrument, warn};

/// PostgreSQL implementation of BillingPoRepository
#[derive(Debug, Clone)]
pub struct PgBillingPoRepository {
    query: BillingPoQuery,
}

impl PgBillingPoRepository {
    /// Create a new billing record repository
    pub fn new(query: BillingPoQuery) -> Self {
        Self { query }
    }

    fn pool(&self) -> &PgPool {
        self.query.pool()
    }

    /// Delete `id`, running `before_commit` with the affected row count while
    /// the transaction is still open. An error from the hook rolls back.
    #[instrument(skip(self, before_commit))]
    pub async fn delete_with<F>(&self, id: i32, before_commit: F) -> AppResult<u64>
    where
        F: FnOnce(u64) -> AppResult<()> + Send,
    {
        let mut tx = self.pool().begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            transaction(e, "Failed to begin transaction")
        })?;

        let outcome = match sqlx::query(DELETE_BILLING_PO)
            .bind(id)
            .execute(&mut *tx)
            .await
        {
            Ok(result) => {
                let affected = result.rows_affected();
                before_commit(affected).map(|()| affected)
            }
            Err(e) => {
                error!("Failed to delete record with id {}: {}", id, e);
                Err(classify(e, &format!("Failed to delete billing record {}", id)))
            }
        };

        match outcome {
            Ok(affected) => {
                tx.commit().await.map_err(|e| {
                    error!("Failed to commit transaction: {}", e);
                    transaction(e, "Failed to commit transaction")
                })?;
                if affected == 0 {
                    debug!(id, "Delete matched no billing record");
                } else {
                    info!(id, "Billing record deleted");
                }
                Ok(affected)
            }
            Err(err) => {
                rollback(tx).await;
                Err(err)
            }
        }
    }
}

async fn rollback(tx: Transaction<'_, Postgres>) {
    if let Err(e) = tx.rollback().await {
        error!("Failed to roll back transaction: {}", e);
    }
}

#[async_trait]
impl BillingPoRepository for PgBillingPoRepository {
    #[instrument(skip(self))]
    async fn fetch_drop_down(&self) -> AppResult<Vec<BillingPoDropDown>> {
        let rows = self.query.fetch_drop_down().await.map_err(|e| {
            error!("Database query failed: {}", e);
            e
        })?;

        if rows.is_empty() {
            warn!("No data found in dropdown query");
            return Err(AppError::NoRows("No dropdown values found".to_string()));
        }

        info!("Successfully fetched dropdown data");
        Ok(rows)
    }

    #[instrument(skip(self, record), fields(bill_no = %record.bill_no))]
    async fn submit(&self, record: &BillingPo) -> AppResult<BillingPo> {
        self.query.submit(record).await.map_err(|e| {
            error!("Failed to submit billing record: {}", e);
            e
        })
    }

    #[instrument(skip(self))]
    async fn fetch_all(&self) -> AppResult<Vec<BillingPo>> {
        self.query.fetch_all().await.map_err(|e| {
            error!("Failed to fetch billing records: {}", e);
            e
        })
    }

    #[instrument(skip(self, record), fields(id = record.id))]
    async fn update(&self, record: &BillingPo) -> AppResult<u64> {
        let affected = self.query.update(record).await.map_err(|e| {
            error!("Failed to update billing record: {}", e);
            e
        })?;

        if affected == 0 {
            warn!(id = record.id, "Update matched no billing record");
        }
        Ok(affected)
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        self.delete_with(id, |_| Ok(())).await
    }
}

#[async_trait]
impl LookupRepository for PgBillingPoRepository {
    async fn list_lookup_values(&self, table: LookupTable) -> AppResult<Vec<String>> {
        self.query.list_lookup_values(table).await
    }

    #[instrument(skip(self))]
    async fn add_lookup_value(&self, table: LookupTable, value: &str) -> AppResult<bool> {
        let added = self.query.add_lookup_value(table, value).await?;
        if added {
            info!(%table, value, "Lookup value registered");
        }
        Ok(added)
    }
}

/// These tests need a PostgreSQL database reachable through `DATABASE_URL`.
/// Each test works with its own bill numbers and cleans up after itself.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{database_url, drop_schema, isolated_pool};
    use crate::{create_pool, init_schema};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    async fn setup() -> PgBillingPoRepository {
        let pool = create_pool(&database_url(), Some(5)).await.unwrap();
        init_schema(&pool).await.unwrap();

        let repo = PgBillingPoRepository::new(BillingPoQuery::new(pool, chrono_tz::UTC));
        repo.add_lookup_value(LookupTable::CustomerName, "Globex")
            .await
            .unwrap();
        repo.add_lookup_value(LookupTable::Unit, "Nos").await.unwrap();
        repo
    }

    async fn cleanup(repo: &PgBillingPoRepository, bill_nos: &[&str]) {
        for bill_no in bill_nos {
            sqlx::query("DELETE FROM billingposubmitteddata WHERE bill_no = $1")
                .bind(bill_no)
                .execute(repo.pool())
                .await
                .unwrap();
        }
    }

    fn sample(bill_no: &str) -> BillingPo {
        BillingPo {
            timestamp: NaiveDate::from_ymd_opt(2024, 4, 1)
                .and_then(|d| d.and_hms_opt(10, 30, 0)),
            engg_name: Some("Ravi".to_string()),
            supplier: Some("Acme".to_string()),
            bill_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            customer_name: Some("Globex".to_string()),
            customer_po_no: Some("PO-77".to_string()),
            customer_po_date: NaiveDate::from_ymd_opt(2024, 3, 15),
            item_description: Some("Panel board".to_string()),
            billed_qty: Some(5),
            unit: Some("Nos".to_string()),
            net_value: Some(dec!(1000.00)),
            cgst: Some(dec!(90.00)),
            igst: Some(dec!(0.00)),
            total_tax: Some(dec!(180.00)),
            gross: Some(dec!(1180.00)),
            dispatch_through: Some("Road".to_string()),
            ..BillingPo::new(bill_no)
        }
    }

    async fn find(repo: &PgBillingPoRepository, bill_no: &str) -> Option<BillingPo> {
        repo.fetch_all()
            .await
            .unwrap()
            .into_iter()
            .find(|po| po.bill_no == bill_no)
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_submit_then_fetch_round_trips() {
        let repo = setup().await;
        cleanup(&repo, &["BN-100"]).await;

        let submitted = repo.submit(&sample("BN-100")).await.unwrap();
        assert!(submitted.id > 0);

        let fetched = find(&repo, "BN-100").await.unwrap();
        assert_eq!(fetched, BillingPo { id: submitted.id, ..sample("BN-100") });
        assert_eq!(fetched.billed_qty, Some(5));
        assert_eq!(fetched.net_value, Some(dec!(1000.00)));

        cleanup(&repo, &["BN-100"]).await;
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_duplicate_bill_no_rejected() {
        let repo = setup().await;
        cleanup(&repo, &["BN-DUP"]).await;

        let first = repo.submit(&sample("BN-DUP")).await.unwrap();
        let err = repo.submit(&sample("BN-DUP")).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));

        let remaining = find(&repo, "BN-DUP").await.unwrap();
        assert_eq!(remaining.id, first.id);

        cleanup(&repo, &["BN-DUP"]).await;
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_unknown_customer_rejected() {
        let repo = setup().await;
        cleanup(&repo, &["BN-FK"]).await;

        let record = BillingPo {
            customer_name: Some("Nobody Ltd".to_string()),
            ..sample("BN-FK")
        };
        let err = repo.submit(&record).await.unwrap_err();
        assert!(matches!(err, AppError::UnknownReference(_)));
        assert!(find(&repo, "BN-FK").await.is_none());
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_submit_without_timestamp_is_stamped() {
        let repo = setup().await;
        cleanup(&repo, &["BN-TS"]).await;

        let record = BillingPo {
            timestamp: None,
            ..sample("BN-TS")
        };
        let stored = repo.submit(&record).await.unwrap();
        assert!(stored.timestamp.is_some());

        cleanup(&repo, &["BN-TS"]).await;
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_update_targets_one_record() {
        let repo = setup().await;
        cleanup(&repo, &["BN-U1", "BN-U2"]).await;

        let target = repo.submit(&sample("BN-U1")).await.unwrap();
        let other = repo.submit(&sample("BN-U2")).await.unwrap();

        let changed = BillingPo {
            billed_qty: Some(9),
            gross: Some(dec!(2124.00)),
            timestamp: None,
            ..target.clone()
        };
        assert_eq!(repo.update(&changed).await.unwrap(), 1);

        let after = find(&repo, "BN-U1").await.unwrap();
        assert_eq!(after.billed_qty, Some(9));
        assert_eq!(after.gross, Some(dec!(2124.00)));
        assert_eq!(after.timestamp, target.timestamp);
        assert_eq!(find(&repo, "BN-U2").await.unwrap(), other);

        cleanup(&repo, &["BN-U1", "BN-U2"]).await;
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_update_with_timestamp_overwrites_it() {
        let repo = setup().await;
        cleanup(&repo, &["BN-U3"]).await;

        let target = repo.submit(&sample("BN-U3")).await.unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 5, 2).and_then(|d| d.and_hms_opt(8, 0, 0));
        let changed = BillingPo {
            timestamp: later,
            ..target.clone()
        };
        assert_eq!(repo.update(&changed).await.unwrap(), 1);
        assert_eq!(find(&repo, "BN-U3").await.unwrap().timestamp, later);

        cleanup(&repo, &["BN-U3"]).await;
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_update_missing_id_succeeds() {
        let repo = setup().await;
        let ghost = BillingPo {
            id: i32::MAX,
            ..sample("BN-GHOST")
        };
        assert_eq!(repo.update(&ghost).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_delete_removes_record() {
        let repo = setup().await;
        cleanup(&repo, &["BN-DEL"]).await;

        let stored = repo.submit(&sample("BN-DEL")).await.unwrap();
        assert_eq!(repo.delete(stored.id).await.unwrap(), 1);
        assert!(find(&repo, "BN-DEL").await.is_none());

        // Deleting again is not an error
        assert_eq!(repo.delete(stored.id).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_delete_fault_before_commit_rolls_back() {
        let repo = setup().await;
        cleanup(&repo, &["BN-RB"]).await;

        let stored = repo.submit(&sample("BN-RB")).await.unwrap();
        let err = repo
            .delete_with(stored.id, |affected| {
                assert_eq!(affected, 1);
                Err(AppError::Internal("simulated fault".to_string()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));

        assert_eq!(find(&repo, "BN-RB").await.unwrap().id, stored.id);

        cleanup(&repo, &["BN-RB"]).await;
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_drop_down_lists_distinct_values() {
        let repo = setup().await;
        cleanup(&repo, &["BN-DD1", "BN-DD2"]).await;

        repo.submit(&sample("BN-DD1")).await.unwrap();
        repo.submit(&sample("BN-DD2")).await.unwrap();

        let values = repo.fetch_drop_down().await.unwrap();
        let expected = sample("BN-DD1").drop_down();
        assert_eq!(values.iter().filter(|dd| **dd == expected).count(), 1);

        cleanup(&repo, &["BN-DD1", "BN-DD2"]).await;
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_drop_down_on_empty_table_is_no_rows() {
        let pool = isolated_pool("srbilling_empty_drop_down").await;
        init_schema(&pool).await.unwrap();
        let repo = PgBillingPoRepository::new(BillingPoQuery::new(pool, chrono_tz::UTC));

        assert!(repo.query.fetch_drop_down().await.unwrap().is_empty());
        assert!(repo.fetch_all().await.unwrap().is_empty());

        let err = repo.fetch_drop_down().await.unwrap_err();
        assert!(matches!(err, AppError::NoRows(_)));
        assert_eq!(repo.delete(12345).await.unwrap(), 0);

        drop_schema("srbilling_empty_drop_down").await;
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_lookup_registration_is_idempotent() {
        let repo = setup().await;

        repo.add_lookup_value(LookupTable::Supplier, "Initech")
            .await
            .unwrap();
        assert!(!repo
            .add_lookup_value(LookupTable::Supplier, "Initech")
            .await
            .unwrap());

        let values = repo.list_lookup_values(LookupTable::Supplier).await.unwrap();
        assert_eq!(values.iter().filter(|v| *v == "Initech").count(), 1);
    }
}
