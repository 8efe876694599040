pub mod health;
pub mod quest;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /init                  GET   session snapshot
/// /submit-score          POST  record a quest completion
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(quest::router())
}
