//! SQLite-backed case store.

use std::str::FromStr;

use async_trait::async_trait;
use casefile::CaseEnvelope;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::warn;

use crate::storage::{decode_row, encode_for_put, millis_to_utc, CaseStore, Result, StoredCase};

#[derive(Debug, sqlx::FromRow)]
struct CaseRow {
    case_id: String,
    state: String,
    updated_at: i64,
}

#[derive(Clone)]
pub struct SqliteCaseStore {
    pool: SqlitePool,
}

impl SqliteCaseStore {
    /// Open (creating if missing) the database at `url` and run migrations.
    pub async fn connect(url: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;
        Self::from_pool(pool).await
    }

    /// Private in-memory database. A single connection that never expires,
    /// otherwise the schema would vanish with a recycled connection.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl CaseStore for SqliteCaseStore {
    async fn put(&self, case_id: &str, envelope: &CaseEnvelope) -> Result<()> {
        let state = encode_for_put(case_id, envelope)?;
        let now = Utc::now().timestamp_millis();

        // REPLACE re-inserts the row, so rowid also tracks write order.
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO cases (case_id, schema_version, state, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(case_id)
        .bind(envelope.schema_version as i64)
        .bind(state)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, case_id: &str) -> Result<Option<CaseEnvelope>> {
        let row: Option<CaseRow> = sqlx::query_as(
            r#"SELECT case_id, state, updated_at FROM cases WHERE case_id = ?1"#,
        )
        .bind(case_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else { return Ok(None) };
        Ok(Some(decode_row(&row.case_id, &row.state)?))
    }

    async fn delete(&self, case_id: &str) -> Result<bool> {
        let res = sqlx::query(r#"DELETE FROM cases WHERE case_id = ?1"#)
            .bind(case_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<StoredCase>> {
        let rows: Vec<CaseRow> = sqlx::query_as(
            r#"
            SELECT case_id, state, updated_at
            FROM cases
            ORDER BY updated_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            match decode_row(&row.case_id, &row.state) {
                Ok(envelope) => out.push(StoredCase {
                    envelope,
                    updated_at: millis_to_utc(row.updated_at),
                }),
                Err(e) => warn!(case_id = %row.case_id, "skipping unreadable case: {e}"),
            }
        }
        Ok(out)
    }
}
