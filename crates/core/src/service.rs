//! Init and submit operations composed over the daily state stores.

use std::sync::Arc;

use crate::daily::{calendar_day, daily_seed, seconds_until_next_midnight};
use crate::error::CoreError;
use crate::leaderboard::{self, LeaderboardEntry, LEADERBOARD_SIZE};
use crate::progress;
use crate::quest::{validate_submission, QuestStage};
use crate::store::KeyValueStore;
use crate::streak;
use crate::types::{Score, Timestamp};

/// Everything a client needs to start today's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSnapshot {
    pub post_id: String,
    pub username: String,
    pub daily_seed: String,
    pub completed_quests: Vec<String>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub streak: i64,
    /// Seconds until the next UTC midnight.
    pub next_quest_in: i64,
    /// First stage the user has not completed today.
    pub next_stage: Option<QuestStage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// First completion of this quest today; side effects were applied.
    Recorded {
        total_score: Score,
        streak_advanced: bool,
    },
    /// The quest was already scored today; nothing changed.
    Duplicate,
}

/// Stateless facade over an injected [`KeyValueStore`].
#[derive(Clone)]
pub struct QuestService {
    store: Arc<dyn KeyValueStore>,
}

impl QuestService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Build the session snapshot for `username`.
    ///
    /// Applies the lazy streak reset but never advances the streak.
    pub async fn init(
        &self,
        post_id: Option<&str>,
        username: &str,
        now: Timestamp,
    ) -> Result<InitSnapshot, CoreError> {
        let post_id = post_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoreError::Configuration("postId is required".into()))?;

        let seed = daily_seed(now);
        let store = self.store();

        let streak = streak::get_streak(store, username, calendar_day(now)).await?;
        let progress = progress::get_progress(store, username, &seed).await?;
        let leaderboard = leaderboard::top_n(store, &seed, LEADERBOARD_SIZE).await?;

        let next_stage = QuestStage::first_pending(&progress.completed_quest_ids);

        Ok(InitSnapshot {
            post_id: post_id.to_string(),
            username: username.to_string(),
            daily_seed: seed,
            completed_quests: progress.completed_quest_ids.into_iter().collect(),
            leaderboard,
            streak,
            next_quest_in: seconds_until_next_midnight(now),
            next_stage,
        })
    }

    /// Record a quest completion and propagate it to the leaderboard and streak.
    ///
    /// A duplicate submission is a successful no-op. If a store write fails
    /// after the completion was claimed, the leaderboard total is refreshed
    /// from the progress store on the user's next new completion.
    pub async fn submit_score(
        &self,
        username: &str,
        quest_id: &str,
        score: Score,
        now: Timestamp,
    ) -> Result<SubmitOutcome, CoreError> {
        validate_submission(quest_id, score)?;
        let quest_id = quest_id.trim();

        let seed = daily_seed(now);
        let store = self.store();

        let completion =
            progress::record_completion(store, username, &seed, quest_id, score).await?;
        if !completion.newly_recorded {
            tracing::info!(username, quest_id, "Duplicate quest submission ignored");
            return Ok(SubmitOutcome::Duplicate);
        }

        let total_score = completion.progress.total_score;
        leaderboard::upsert_score(store, &seed, username, total_score).await?;
        let streak_advanced = streak::touch(store, username, calendar_day(now)).await?;

        tracing::info!(
            username,
            quest_id,
            score,
            total_score,
            streak_advanced,
            "Quest completion recorded"
        );

        Ok(SubmitOutcome::Recorded {
            total_score,
            streak_advanced,
        })
    }
}
