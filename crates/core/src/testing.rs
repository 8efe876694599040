//! Store wrapper for unit tests that need a failing write or a write from
//! another caller to land at an exact point.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::memory::MemoryStore;
use crate::store::{KeyValueStore, StoreError, StoreResult};
use crate::streak;
use crate::types::CalendarDay;

/// A [`MemoryStore`] whose next `compare_and_set` can be made to fail, or be
/// preceded by another user's streak `touch`.
#[derive(Default)]
pub struct ScriptedStore {
    pub inner: MemoryStore,
    fail_next_cas: AtomicBool,
    touch_before_next_cas: Mutex<Option<(String, CalendarDay)>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_compare_and_set(&self) {
        self.fail_next_cas.store(true, Ordering::SeqCst);
    }

    pub fn touch_before_next_compare_and_set(&self, username: &str, day: CalendarDay) {
        *self.touch_before_next_cas.lock().unwrap() = Some((username.to_string(), day));
    }
}

#[async_trait]
impl KeyValueStore for ScriptedStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner.set(key, value).await
    }

    async fn compare_and_set(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> StoreResult<bool> {
        if self.fail_next_cas.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend("connection reset".into()));
        }
        let pending = self.touch_before_next_cas.lock().unwrap().take();
        if let Some((username, day)) = pending {
            streak::touch(&self.inner, &username, day).await?;
        }
        self.inner.compare_and_set(key, expected, value).await
    }

    async fn incr_by(&self, key: &str, delta: i64) -> StoreResult<i64> {
        self.inner.incr_by(key, delta).await
    }

    async fn set_add(&self, key: &str, member: &str) -> StoreResult<bool> {
        self.inner.set_add(key, member).await
    }

    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        self.inner.set_members(key).await
    }

    async fn sorted_upsert(&self, key: &str, member: &str, score: i64) -> StoreResult<()> {
        self.inner.sorted_upsert(key, member, score).await
    }

    async fn sorted_range_desc(
        &self,
        key: &str,
        start: usize,
        stop: usize,
    ) -> StoreResult<Vec<(String, i64)>> {
        self.inner.sorted_range_desc(key, start, stop).await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }
}
