//! Idempotent schema creation
//!
//! Creates the four lookup tables and the billing record table if they are
//! absent. All statements run in one transaction, serialized across
//! concurrent callers by a transaction-scoped advisory lock.

use crate::error::{schema, transaction};
use srbilling_core::{models::LookupTable, AppResult};
use sqlx::PgPool;
use tracing::{error, info, instrument};

/// Main billing record table
pub const BILLING_TABLE: &str = "billingposubmitteddata";

const CREATE_BILLING_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS billingposubmitteddata (
        id SERIAL PRIMARY KEY,
        timestamp TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        engg_name VARCHAR(255),
        supplier VARCHAR(255),
        bill_no VARCHAR(100) NOT NULL UNIQUE,
        bill_date DATE,
        customer_name VARCHAR(255) REFERENCES customername(customer_name),
        customer_po_no VARCHAR(100),
        customer_po_date DATE,
        item_description TEXT,
        billed_qty INT,
        unit VARCHAR(100) REFERENCES unit(unit_name),
        net_value DECIMAL(12,2),
        cgst DECIMAL(12,2),
        igst DECIMAL(12,2),
        total_tax DECIMAL(12,2),
        gross DECIMAL(12,2),
        dispatch_through VARCHAR(255)
    )
"#;

/// Advisory lock key held while the schema is created
pub const SCHEMA_LOCK_KEY: i64 = 0x5352_4249_4c4c;

/// DDL statements in execution order: lookup tables first, then the
/// billing table that references them
pub fn schema_statements() -> Vec<String> {
    let mut statements: Vec<String> = LookupTable::ALL
        .iter()
        .map(|table| {
            format!(
                "CREATE TABLE IF NOT EXISTS {} ({} VARCHAR({}) NOT NULL UNIQUE)",
                table.table_name(),
                table.column_name(),
                table.column_width()
            )
        })
        .collect();
    statements.push(CREATE_BILLING_TABLE.to_string());
    statements
}

/// Ensure all tables exist
///
/// Any failing statement rolls back the whole batch and its error is returned.
#[instrument(skip(pool))]
pub async fn init_schema(pool: &PgPool) -> AppResult<()> {
    let mut tx = pool.begin().await.map_err(|e| {
        error!("Failed to begin schema transaction: {}", e);
        transaction(e, "Failed to begin schema transaction")
    })?;

    if let Err(e) = sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await
    {
        error!("Failed to acquire schema lock: {}", e);
        if let Err(rollback_err) = tx.rollback().await {
            error!("Failed to roll back schema transaction: {}", rollback_err);
        }
        return Err(schema(e, "Failed to acquire schema lock"));
    }

    for statement in schema_statements() {
        if let Err(e) = sqlx::query(&statement).execute(&mut *tx).await {
            error!("Failed to execute schema statement: {}", statement.trim());
            if let Err(rollback_err) = tx.rollback().await {
                error!("Failed to roll back schema transaction: {}", rollback_err);
            }
            return Err(schema(e, "Failed to create tables"));
        }
    }

    tx.commit().await.map_err(|e| {
        error!("Failed to commit schema transaction: {}", e);
        transaction(e, "Failed to commit schema transaction")
    })?;

    info!("All tables created successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{database_url, drop_schema, isolated_pool};

    #[test]
    fn test_lookup_tables_precede_billing_table() {
        let statements = schema_statements();
        assert_eq!(statements.len(), 5);
        assert!(statements[0].contains("customername (customer_name VARCHAR(255)"));
        assert!(statements[1].contains("unit (unit_name VARCHAR(100)"));
        assert!(statements[2].contains("enggname (engg_name"));
        assert!(statements[3].contains("supplier (supplier_name"));
        assert!(statements[4].contains(BILLING_TABLE));
    }

    #[test]
    fn test_every_statement_is_idempotent() {
        for statement in schema_statements() {
            assert!(statement.contains("CREATE TABLE IF NOT EXISTS"));
        }
    }

    #[test]
    fn test_billing_table_constraints() {
        assert!(CREATE_BILLING_TABLE.contains("bill_no VARCHAR(100) NOT NULL UNIQUE"));
        assert!(CREATE_BILLING_TABLE.contains("REFERENCES customername(customer_name)"));
        assert!(CREATE_BILLING_TABLE.contains("REFERENCES unit(unit_name)"));
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_init_schema_twice() {
        let pool = crate::create_pool(&database_url(), Some(2)).await.unwrap();

        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_concurrent_init_on_fresh_schema() {
        let pool = isolated_pool("srbilling_concurrent_init").await;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { init_schema(&pool).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = current_schema()",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(tables, 5);

        drop_schema("srbilling_concurrent_init").await;
    }
}
