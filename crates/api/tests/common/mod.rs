#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::TimeZone;
use http_body_util::BodyExt;
use tower::ServiceExt;

use quest_api::clock::FixedClock;
use quest_api::config::{ServerConfig, StoreBackend};
use quest_api::middleware::identity::{POST_ID_HEADER, USERNAME_HEADER};
use quest_api::router::build_app_router;
use quest_api::state::AppState;
use quest_core::service::QuestService;
use quest_core::store::{KeyValueStore, StoreError, StoreResult};
use quest_core::types::Timestamp;

pub const POST_ID: &str = "t3_dailyquest";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        default_post_id: None,
        store_backend: StoreBackend::Memory,
    }
}

/// 2024-03-07 15:00:00 UTC, nine hours before the next daily rollover.
pub fn test_now() -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2024, 3, 7, 15, 0, 0).unwrap()
}

/// Build the full application router over `store`, pinned to [`test_now`].
pub fn build_test_app(store: Arc<dyn KeyValueStore>) -> Router {
    build_test_app_at(store, test_now())
}

/// Build the full application router over `store` with the clock fixed at `now`.
pub fn build_test_app_at(store: Arc<dyn KeyValueStore>, now: Timestamp) -> Router {
    build_test_app_with_config(store, now, test_config())
}

pub fn build_test_app_with_config(
    store: Arc<dyn KeyValueStore>,
    now: Timestamp,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        service: QuestService::new(store),
        config: Arc::new(config.clone()),
        clock: Arc::new(FixedClock(now)),
    };
    build_app_router(state, &config)
}

/// GET `uri` as `username` from inside `post_id`.
pub async fn get(
    app: Router,
    uri: &str,
    username: Option<&str>,
    post_id: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(username) = username {
        builder = builder.header(USERNAME_HEADER, username);
    }
    if let Some(post_id) = post_id {
        builder = builder.header(POST_ID_HEADER, post_id);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// GET `/api/init` as `username` inside the default test post.
pub async fn init(app: Router, username: &str) -> Response<Body> {
    get(app, "/api/init", Some(username), Some(POST_ID)).await
}

/// POST a raw body with a JSON content type.
pub async fn post_raw(app: Router, uri: &str, username: Option<&str>, body: String) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(username) = username {
        builder = builder.header(USERNAME_HEADER, username);
    }
    app.oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// POST `/api/submit-score` as `username`.
pub async fn submit(app: Router, username: &str, quest_id: &str, score: i64) -> Response<Body> {
    let body = serde_json::json!({ "questId": quest_id, "score": score });
    post_raw(app, "/api/submit-score", Some(username), body.to_string()).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A store whose every call fails, for exercising storage error paths.
pub struct FailingStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Backend("connection refused".into()))
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        down()
    }

    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        down()
    }

    async fn compare_and_set(
        &self,
        _key: &str,
        _expected: Option<&str>,
        _value: &str,
    ) -> StoreResult<bool> {
        down()
    }

    async fn incr_by(&self, _key: &str, _delta: i64) -> StoreResult<i64> {
        down()
    }

    async fn set_add(&self, _key: &str, _member: &str) -> StoreResult<bool> {
        down()
    }

    async fn set_members(&self, _key: &str) -> StoreResult<Vec<String>> {
        down()
    }

    async fn sorted_upsert(&self, _key: &str, _member: &str, _score: i64) -> StoreResult<()> {
        down()
    }

    async fn sorted_range_desc(
        &self,
        _key: &str,
        _start: usize,
        _stop: usize,
    ) -> StoreResult<Vec<(String, i64)>> {
        down()
    }

    async fn ping(&self) -> StoreResult<()> {
        down()
    }
}
