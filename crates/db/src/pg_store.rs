//! [`KeyValueStore`] over three PostgreSQL tables.
//!
//! Each trait call is a single statement, so atomicity comes from
//! PostgreSQL's row-level upsert semantics (`INSERT ... ON CONFLICT`).

use async_trait::async_trait;
use quest_core::store::{parse_int, KeyValueStore, StoreError, StoreResult};

use crate::DbPool;

/// Store backed by `kv_entries`, `kv_set_members` and `kv_sorted_members`.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, "Key-value query failed");
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl KeyValueStore for PgStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_entries WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO kv_entries (key, value) VALUES ($1, $2)
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> StoreResult<bool> {
        let result = match expected {
            None => {
                sqlx::query(
                    "INSERT INTO kv_entries (key, value) VALUES ($1, $2)
                     ON CONFLICT (key) DO NOTHING",
                )
                .bind(key)
                .bind(value)
                .execute(&self.pool)
                .await
            }
            Some(expected) => {
                sqlx::query(
                    "UPDATE kv_entries SET value = $3, updated_at = NOW()
                     WHERE key = $1 AND value = $2",
                )
                .bind(key)
                .bind(expected)
                .bind(value)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(backend)?;
        Ok(result.rows_affected() == 1)
    }

    async fn incr_by(&self, key: &str, delta: i64) -> StoreResult<i64> {
        let (value,): (String,) = sqlx::query_as(
            "INSERT INTO kv_entries (key, value) VALUES ($1, $2::BIGINT::TEXT)
             ON CONFLICT (key) DO UPDATE
                SET value = (kv_entries.value::BIGINT + $2::BIGINT)::TEXT,
                    updated_at = NOW()
             RETURNING value",
        )
        .bind(key)
        .bind(delta)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;
        parse_int(key, Some(value))
    }

    async fn set_add(&self, key: &str, member: &str) -> StoreResult<bool> {
        let result = sqlx::query(
            "INSERT INTO kv_set_members (set_key, member) VALUES ($1, $2)
             ON CONFLICT (set_key, member) DO NOTHING",
        )
        .bind(key)
        .bind(member)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(result.rows_affected() == 1)
    }

    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT member FROM kv_set_members WHERE set_key = $1")
                .bind(key)
                .fetch_all(&self.pool)
                .await
                .map_err(backend)?;
        Ok(rows.into_iter().map(|(member,)| member).collect())
    }

    async fn sorted_upsert(&self, key: &str, member: &str, score: i64) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO kv_sorted_members (set_key, member, score) VALUES ($1, $2, $3)
             ON CONFLICT (set_key, member) DO UPDATE
                SET score = EXCLUDED.score, updated_at = NOW()",
        )
        .bind(key)
        .bind(member)
        .bind(score)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn sorted_range_desc(
        &self,
        key: &str,
        start: usize,
        stop: usize,
    ) -> StoreResult<Vec<(String, i64)>> {
        if start > stop {
            return Ok(Vec::new());
        }
        let offset = i64::try_from(start).unwrap_or(i64::MAX);
        let limit = i64::try_from(stop - start + 1).unwrap_or(i64::MAX);

        sqlx::query_as(
            "SELECT member, score FROM kv_sorted_members
             WHERE set_key = $1
             ORDER BY score DESC, member ASC
             OFFSET $2 LIMIT $3",
        )
        .bind(key)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await.map_err(backend)
    }
}
