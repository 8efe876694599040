//! Handlers for the daily quest session: init and score submission.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use quest_core::leaderboard::LeaderboardEntry;
use quest_core::quest::QuestStage;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::identity::{GameSession, Player};
use crate::response::StatusResponse;
use crate::state::AppState;

/// Snapshot returned by `GET /api/init`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitResponse {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub post_id: String,
    pub username: String,
    pub daily_seed: String,
    pub completed_quests: Vec<String>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub streak: i64,
    /// Seconds until the next UTC midnight.
    pub next_quest_in: i64,
    /// Today's quest line, in play order.
    pub quests: Vec<QuestStage>,
    /// First stage the user has not completed today, `null` when done.
    pub next_quest: Option<QuestStage>,
}

/// Body of `POST /api/submit-score`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    #[validate(length(min = 1, max = 64, message = "questId must be 1-64 characters"))]
    pub quest_id: String,
    #[validate(range(min = 0, max = 1_000_000, message = "score must be between 0 and 1000000"))]
    pub score: i64,
}

/// GET /api/init
///
/// Current day's state for the caller. Never advances the streak. A storage
/// failure is a 400 with a generic message.
pub async fn init(
    State(state): State<AppState>,
    player: Player,
    session: GameSession,
) -> AppResult<Json<InitResponse>> {
    let now = state.clock.now();
    let snapshot = state
        .service
        .init(session.post_id.as_deref(), &player.username, now)
        .await
        .map_err(AppError::failed(StatusCode::BAD_REQUEST, "Initialization failed"))?;

    tracing::debug!(
        username = %snapshot.username,
        streak = snapshot.streak,
        completed = snapshot.completed_quests.len(),
        "Session initialised"
    );

    Ok(Json(InitResponse {
        kind: "init",
        post_id: snapshot.post_id,
        username: snapshot.username,
        daily_seed: snapshot.daily_seed,
        completed_quests: snapshot.completed_quests,
        leaderboard: snapshot.leaderboard,
        streak: snapshot.streak,
        next_quest_in: snapshot.next_quest_in,
        quests: QuestStage::ALL.to_vec(),
        next_quest: snapshot.next_stage,
    }))
}

/// POST /api/submit-score
///
/// Record a quest completion. Re-submitting a quest already scored today
/// succeeds without changing anything. A storage failure is a 200 whose body
/// carries `"status": "error"`.
pub async fn submit_score(
    State(state): State<AppState>,
    player: Player,
    payload: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> AppResult<Json<StatusResponse>> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let now = state.clock.now();
    let outcome = state
        .service
        .submit_score(&player.username, &input.quest_id, input.score, now)
        .await
        .map_err(AppError::failed(StatusCode::OK, "Failed to submit score"))?;

    tracing::debug!(username = %player.username, quest_id = %input.quest_id, ?outcome, "Score submitted");

    Ok(Json(StatusResponse::success()))
}
