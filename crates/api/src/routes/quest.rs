use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Daily quest routes, mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/init", get(handlers::quest::init))
        .route("/submit-score", post(handlers::quest::submit_score))
}
