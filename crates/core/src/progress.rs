//! Per-user daily progress: completed quest ids and the day's total score.

use std::collections::BTreeSet;

use crate::keys;
use crate::store::{parse_int, KeyValueStore, StoreResult};
use crate::types::Score;

/// A user's state for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDailyProgress {
    pub completed_quest_ids: BTreeSet<String>,
    pub total_score: Score,
}

impl UserDailyProgress {
    pub fn has_completed(&self, quest_id: &str) -> bool {
        self.completed_quest_ids.contains(quest_id)
    }
}

/// Result of [`record_completion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub progress: UserDailyProgress,
    /// `false` when the quest had already been scored today.
    pub newly_recorded: bool,
}

/// Read a user's progress for the seeded day. Absent state is empty, not an error.
pub async fn get_progress(
    store: &dyn KeyValueStore,
    username: &str,
    seed: &str,
) -> StoreResult<UserDailyProgress> {
    let completed = store
        .set_members(&keys::completed_quests(username, seed))
        .await?;
    let total_key = keys::total_score(username, seed);
    let total_score = parse_int(&total_key, store.get(&total_key).await?)?;

    Ok(UserDailyProgress {
        completed_quest_ids: completed.into_iter().collect(),
        total_score,
    })
}

/// Mark `quest_id` completed and add `score_delta` to the day's total.
///
/// Membership is claimed with an atomic set insert before the score moves,
/// so when two submissions for the same quest race only the one that wins
/// the insert applies its delta.
pub async fn record_completion(
    store: &dyn KeyValueStore,
    username: &str,
    seed: &str,
    quest_id: &str,
    score_delta: Score,
) -> StoreResult<Completion> {
    let claimed = store
        .set_add(&keys::completed_quests(username, seed), quest_id)
        .await?;

    if !claimed {
        tracing::debug!(username, quest_id, "Quest already completed today");
        return Ok(Completion {
            progress: get_progress(store, username, seed).await?,
            newly_recorded: false,
        });
    }

    store
        .incr_by(&keys::total_score(username, seed), score_delta)
        .await?;

    Ok(Completion {
        progress: get_progress(store, username, seed).await?,
        newly_recorded: true,
    })
}
