//! In-process [`KeyValueStore`] used by tests and local development.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::store::{parse_int, KeyValueStore, StoreError, StoreResult};

#[derive(Default)]
struct Inner {
    strings: HashMap<String, String>,
    sets: HashMap<String, HashSet<String>>,
    sorted: HashMap<String, HashMap<String, i64>>,
}

/// A single-mutex store. Every call runs to completion under the lock, which
/// gives the same per-command atomicity as a single-threaded KV server.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.inner.lock().await.strings.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner
            .lock()
            .await
            .strings
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> StoreResult<bool> {
        let mut inner = self.inner.lock().await;
        if inner.strings.get(key).map(String::as_str) != expected {
            return Ok(false);
        }
        inner.strings.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn incr_by(&self, key: &str, delta: i64) -> StoreResult<i64> {
        let mut inner = self.inner.lock().await;
        let current = parse_int(key, inner.strings.get(key).cloned())?;
        let next = current.checked_add(delta).ok_or_else(|| {
            StoreError::Backend(format!("increment of '{key}' by {delta} overflows"))
        })?;
        inner.strings.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    async fn set_add(&self, key: &str, member: &str) -> StoreResult<bool> {
        Ok(self
            .inner
            .lock()
            .await
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string()))
    }

    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .inner
            .lock()
            .await
            .sets
            .get(key)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn sorted_upsert(&self, key: &str, member: &str, score: i64) -> StoreResult<()> {
        self.inner
            .lock()
            .await
            .sorted
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string(), score);
        Ok(())
    }

    async fn sorted_range_desc(
        &self,
        key: &str,
        start: usize,
        stop: usize,
    ) -> StoreResult<Vec<(String, i64)>> {
        let inner = self.inner.lock().await;
        let Some(members) = inner.sorted.get(key) else {
            return Ok(Vec::new());
        };
        if start > stop {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<(String, i64)> = members
            .iter()
            .map(|(member, score)| (member.clone(), *score))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(ranked
            .into_iter()
            .skip(start)
            .take(stop - start + 1)
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
