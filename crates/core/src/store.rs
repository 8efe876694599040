//! Key-value storage capability consumed by the quest state model.
//!
//! The operations mirror what a Redis-style store offers: plain strings with
//! a compare-and-set, atomic integer increments, sets, and score-sorted sets. Implementations
//! must make every single call atomic; the state model composes them without
//! any locking of its own.

use async_trait::async_trait;

/// Failure reported by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not complete the call (connection, query, ...).
    #[error("Storage backend failure: {0}")]
    Backend(String),

    /// A key holds a value that cannot be interpreted as the expected type.
    #[error("Corrupt value under key '{key}': {value}")]
    Corrupt { key: String, value: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a string value. `None` when the key is absent.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Unconditionally write a string value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Write `value` only if the key currently holds `expected` (`None`
    /// meaning absent). Returns `true` when this call wrote it.
    async fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> StoreResult<bool>;

    /// Atomically add `delta` to an integer key (absent counts as 0) and
    /// return the new value.
    async fn incr_by(&self, key: &str, delta: i64) -> StoreResult<i64>;

    /// Add `member` to the set at `key`. Returns `true` when newly added.
    async fn set_add(&self, key: &str, member: &str) -> StoreResult<bool>;

    /// All members of the set at `key`, in no particular order.
    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>>;

    /// Set `member`'s score in the sorted set at `key` to the absolute `score`.
    async fn sorted_upsert(&self, key: &str, member: &str, score: i64) -> StoreResult<()>;

    /// Members ranked `start..=stop` by descending score.
    async fn sorted_range_desc(
        &self,
        key: &str,
        start: usize,
        stop: usize,
    ) -> StoreResult<Vec<(String, i64)>>;

    /// Cheap liveness probe.
    async fn ping(&self) -> StoreResult<()>;
}

/// Parse an integer stored under `key`, treating absence as zero.
pub fn parse_int(key: &str, raw: Option<String>) -> StoreResult<i64> {
    match raw {
        None => Ok(0),
        Some(value) => value.trim().parse().map_err(|_| StoreError::Corrupt {
            key: key.to_string(),
            value,
        }),
    }
}
