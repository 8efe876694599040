//! Storage key layout.
//!
//! Per-day keys embed the daily seed, so yesterday's state is simply never
//! read again once the seed rolls over.

/// Set of quest ids the user completed on the seeded day.
pub fn completed_quests(username: &str, seed: &str) -> String {
    format!("user:{username}:{seed}:completed")
}

/// Running total score for the seeded day.
pub fn total_score(username: &str, seed: &str) -> String {
    format!("user:{username}:{seed}:total_score")
}

/// Streak count and last active day, stored together as one JSON value.
pub fn streak(username: &str) -> String {
    format!("user:{username}:streak")
}

/// Sorted set of username to daily total score.
pub fn leaderboard(seed: &str) -> String {
    format!("leaderboard:{seed}")
}
