//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use payments_types::{NewPayment, Payment, PaymentId, PaymentRepository, PaymentUid, RepoError};

use crate::types::{DbSqlitePayment, PAYMENT_COLUMNS};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every in-memory connection is its own database, so keep exactly one.
        let max_connections = if database_url.contains(":memory:") {
            1
        } else {
            5
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.create_schema().await?;

        tracing::debug!("SQLite payment store ready");
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_payments.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    /// Explains why a guarded write touched no row.
    async fn guard_failure(&self, id: PaymentId) -> RepoError {
        let row: Result<Option<bool>, _> =
            sqlx::query_scalar(r#"SELECT processed FROM payments WHERE id = ? AND deleted_at IS NULL"#)
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await;

        match row {
            Ok(Some(_)) => RepoError::Conflict("Payment already processed".into()),
            Ok(None) => RepoError::NotFound,
            Err(e) => RepoError::Database(e.to_string()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRepository for SqliteRepo {
    async fn list_all(&self) -> Result<Vec<Payment>, RepoError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE deleted_at IS NULL ORDER BY id",
            PAYMENT_COLUMNS
        );

        let rows: Vec<DbSqlitePayment> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbSqlitePayment::into_domain).collect()
    }

    async fn find_by_uid(&self, uid: &PaymentUid) -> Result<Option<Payment>, RepoError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE uid = ? AND deleted_at IS NULL",
            PAYMENT_COLUMNS
        );

        let row: Option<DbSqlitePayment> = sqlx::query_as(&sql)
            .bind(uid.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbSqlitePayment::into_domain).transpose()
    }

    async fn insert(&self, payment: NewPayment) -> Result<Payment, RepoError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"INSERT INTO payments (uid, account_origin, account_target, amount, date, processed, processed_date, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, 0, NULL, ?, ?)"#,
        )
        .bind(payment.uid.as_str())
        .bind(&payment.account_origin)
        .bind(&payment.account_target)
        .bind(payment.amount.value())
        .bind(payment.date.to_rfc3339())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(payment.into_payment(PaymentId::new(result.last_insert_rowid())))
    }

    async fn replace(&self, payment: &Payment) -> Result<Payment, RepoError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"UPDATE payments
               SET account_origin = ?, account_target = ?, amount = ?, date = ?,
                   processed = ?, processed_date = ?, updated_at = ?
               WHERE id = ? AND processed = 0 AND deleted_at IS NULL"#,
        )
        .bind(&payment.account_origin)
        .bind(&payment.account_target)
        .bind(payment.amount.value())
        .bind(payment.date.to_rfc3339())
        .bind(payment.is_processed())
        .bind(payment.processed_at().map(|dt| dt.to_rfc3339()))
        .bind(&now)
        .bind(payment.id.value())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(self.guard_failure(payment.id).await);
        }

        Ok(payment.clone())
    }

    async fn remove(&self, payment: &Payment) -> Result<(), RepoError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"UPDATE payments SET deleted_at = ?, updated_at = ?
               WHERE id = ? AND processed = 0 AND deleted_at IS NULL"#,
        )
        .bind(&now)
        .bind(&now)
        .bind(payment.id.value())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(self.guard_failure(payment.id).await);
        }

        Ok(())
    }
}
