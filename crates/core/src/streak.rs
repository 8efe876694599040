//! Consecutive-day activity streaks.
//!
//! The count and the last active day live in one value under
//! [`keys::streak`], and every write is a compare-and-set against the value
//! that was read. The stored streak is only advanced by [`touch`];
//! [`get_streak`] applies a lazy reset when the user has missed a full
//! calendar day. A write that lost a race re-reads and re-evaluates.

use serde::{Deserialize, Serialize};

use crate::daily::days_between;
use crate::keys;
use crate::store::{KeyValueStore, StoreError, StoreResult};
use crate::types::CalendarDay;

/// Gap (in calendar days) beyond which a streak is broken.
const MAX_GAP_DAYS: i64 = 1;

/// Compare-and-set attempts before giving up on a contended key.
const MAX_ATTEMPTS: usize = 8;

/// Stored streak state for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub streak: i64,
    pub last_active_day: Option<CalendarDay>,
}

impl StreakState {
    /// Whether the streak is broken as of `today`.
    pub fn is_lapsed(&self, today: CalendarDay) -> bool {
        self.last_active_day
            .is_some_and(|last| days_between(last, today) > MAX_GAP_DAYS)
    }

    /// Stored form, e.g. `{"streak":3,"lastActiveDay":"2024-03-07"}`.
    pub fn encode(&self) -> StoreResult<String> {
        serde_json::to_string(self).map_err(|e| StoreError::Backend(e.to_string()))
    }
}

/// The stored state together with the exact raw value it was decoded from.
struct Versioned {
    raw: Option<String>,
    state: StreakState,
}

async fn read(store: &dyn KeyValueStore, key: &str) -> StoreResult<Versioned> {
    let raw = store.get(key).await?;
    let state = match raw.as_deref() {
        None => StreakState::default(),
        Some(value) => serde_json::from_str(value).map_err(|_| StoreError::Corrupt {
            key: key.to_string(),
            value: value.to_string(),
        })?,
    };
    Ok(Versioned { raw, state })
}

fn contended(key: &str) -> StoreError {
    tracing::warn!(key, attempts = MAX_ATTEMPTS, "Streak update kept losing races");
    StoreError::Backend(format!("too much contention on '{key}'"))
}

/// Read the raw stored state without applying any reset.
pub async fn load(store: &dyn KeyValueStore, username: &str) -> StoreResult<StreakState> {
    Ok(read(store, &keys::streak(username)).await?.state)
}

/// Effective streak as of `today`, persisting a reset to 0 if the streak lapsed.
///
/// The reset only lands if the state is still the lapsed one that was read,
/// so it never overwrites a concurrent [`touch`] for today.
pub async fn get_streak(
    store: &dyn KeyValueStore,
    username: &str,
    today: CalendarDay,
) -> StoreResult<i64> {
    let key = keys::streak(username);

    for _ in 0..MAX_ATTEMPTS {
        let current = read(store, &key).await?;
        if !current.state.is_lapsed(today) {
            return Ok(current.state.streak);
        }
        if current.state.streak == 0 {
            return Ok(0);
        }

        let reset = StreakState {
            streak: 0,
            ..current.state
        };
        if store
            .compare_and_set(&key, current.raw.as_deref(), &reset.encode()?)
            .await?
        {
            tracing::info!(username, previous = current.state.streak, "Streak lapsed, resetting");
            return Ok(0);
        }
    }

    Err(contended(&key))
}

/// Advance the streak for the first activity of `today`.
///
/// Returns `true` when this call advanced the streak. The new count and the
/// day are written in one compare-and-set, so concurrent first activities of
/// the same day advance the streak once, and a failed write leaves nothing
/// behind that would block a later attempt.
pub async fn touch(
    store: &dyn KeyValueStore,
    username: &str,
    today: CalendarDay,
) -> StoreResult<bool> {
    let key = keys::streak(username);

    for _ in 0..MAX_ATTEMPTS {
        let current = read(store, &key).await?;
        if current.state.last_active_day == Some(today) {
            return Ok(false);
        }

        let base = if current.state.is_lapsed(today) {
            0
        } else {
            current.state.streak
        };
        let next = StreakState {
            streak: base + 1,
            last_active_day: Some(today),
        };
        if store
            .compare_and_set(&key, current.raw.as_deref(), &next.encode()?)
            .await?
        {
            tracing::debug!(username, streak = next.streak, %today, "Streak advanced");
            return Ok(true);
        }
    }

    Err(contended(&key))
}
