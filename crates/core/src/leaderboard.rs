//! Per-day leaderboard of username to cumulative daily score.

use serde::Serialize;

use crate::keys;
use crate::store::{KeyValueStore, StoreResult};
use crate::types::Score;

/// Number of entries shown on the daily leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: Score,
}

/// Set `username`'s score on the seeded day's board to the absolute `total`.
pub async fn upsert_score(
    store: &dyn KeyValueStore,
    seed: &str,
    username: &str,
    total: Score,
) -> StoreResult<()> {
    store
        .sorted_upsert(&keys::leaderboard(seed), username, total)
        .await
}

/// Up to `n` entries, highest score first.
pub async fn top_n(
    store: &dyn KeyValueStore,
    seed: &str,
    n: usize,
) -> StoreResult<Vec<LeaderboardEntry>> {
    if n == 0 {
        return Ok(Vec::new());
    }

    let ranked = store
        .sorted_range_desc(&keys::leaderboard(seed), 0, n - 1)
        .await?;

    Ok(ranked
        .into_iter()
        .map(|(username, score)| LeaderboardEntry { username, score })
        .collect())
}
