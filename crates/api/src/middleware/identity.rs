//! Identity and session-context extractors.
//!
//! The hosting platform authenticates the user and forwards who they are
//! and which post the game runs in as request headers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::state::AppState;

/// Header carrying the platform username.
pub const USERNAME_HEADER: &str = "x-username";

/// Header carrying the id of the post hosting the game.
pub const POST_ID_HEADER: &str = "x-post-id";

/// Username used when the platform does not identify the caller.
pub const ANONYMOUS: &str = "anonymous";

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// The calling user.
#[derive(Debug, Clone)]
pub struct Player {
    pub username: String,
}

impl<S> FromRequestParts<S> for Player
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = header_value(parts, USERNAME_HEADER).unwrap_or_else(|| ANONYMOUS.into());
        Ok(Player { username })
    }
}

/// The game-session context. `post_id` is `None` outside a game post.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub post_id: Option<String>,
}

impl FromRequestParts<AppState> for GameSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let post_id = header_value(parts, POST_ID_HEADER)
            .or_else(|| state.config.default_post_id.clone());
        Ok(GameSession { post_id })
    }
}
