//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use payments_types::{NewPayment, Payment, PaymentId, PaymentRepository, PaymentUid, RepoError};

use crate::types::{DbPayment, PAYMENT_COLUMNS};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository. Mutations are single guarded statements, so the
/// processed check and the write happen atomically.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_payments_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        tracing::debug!("PostgreSQL payment store ready");
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }

    /// Explains why a guarded write touched no row.
    async fn guard_failure(&self, id: PaymentId) -> RepoError {
        let row: Result<Option<bool>, _> = sqlx::query_scalar(
            r#"SELECT processed FROM payments WHERE id = $1 AND deleted_at IS NULL"#,
        )
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
impl PaymentRepository for PostgresRepo {
    async fn list_all(&self) -> Result<Vec<Payment>, RepoError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE deleted_at IS NULL ORDER BY id",
            PAYMENT_COLUMNS
        );

        let rows: Vec<DbPayment> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbPayment::into_domain).collect()
    }

    async fn find_by_uid(&self, uid: &PaymentUid) -> Result<Option<Payment>, RepoError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE uid = $1 AND deleted_at IS NULL",
            PAYMENT_COLUMNS
        );

        let row: Option<DbPayment> = sqlx::query_as(&sql)
            .bind(uid.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbPayment::into_domain).transpose()
    }

    async fn insert(&self, payment: NewPayment) -> Result<Payment, RepoError> {
        let sql = format!(
            r#"INSERT INTO payments (uid, account_origin, account_target, amount, date, processed, processed_date, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, FALSE, NULL, $6, $6)
               RETURNING {}"#,
            PAYMENT_COLUMNS
        );

        // TIMESTAMPTZ keeps microseconds; answer with what was stored.
        let row: DbPayment = sqlx::query_as(&sql)
            .bind(payment.uid.as_str())
            .bind(&payment.account_origin)
            .bind(&payment.account_target)
            .bind(payment.amount.value())
            .bind(payment.date)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.into_domain()
    }

    async fn replace(&self, payment: &Payment) -> Result<Payment, RepoError> {
        let result = sqlx::query(
            r#"UPDATE payments
               SET account_origin = $1, account_target = $2, amount = $3, date = $4,
                   processed = $5, processed_date = $6, updated_at = $7
               WHERE id = $8 AND processed = FALSE AND deleted_at IS NULL"#,
        )
        .bind(&payment.account_origin)
        .bind(&payment.account_target)
        .bind(payment.amount.value())
        .bind(payment.date)
        .bind(payment.is_processed())
        .bind(payment.processed_at())
        .bind(Utc::now())
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
        let now = Utc::now();

        let result = sqlx::query(
            r#"UPDATE payments SET deleted_at = $1, updated_at = $1
               WHERE id = $2 AND processed = FALSE AND deleted_at IS NULL"#,
        )
        .bind(now)
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
