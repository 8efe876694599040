use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quest_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ "status": "error", "message": ... }`
/// bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `quest_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An operation failed on storage. Only `message` reaches the client,
    /// with the status the operation's contract specifies.
    #[error("{message}: {source}")]
    Failed {
        status: StatusCode,
        message: &'static str,
        #[source]
        source: CoreError,
    },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Map a [`CoreError`] from a named operation.
    ///
    /// Storage failures collapse into a generic `message` sent with
    /// `status`; configuration and validation errors keep their own detail.
    pub fn failed(
        status: StatusCode,
        message: &'static str,
    ) -> impl FnOnce(CoreError) -> AppError {
        move |err| match err {
            CoreError::Storage(_) => AppError::Failed {
                status,
                message,
                source: err,
            },
            other => AppError::Core(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Configuration(msg) => {
                    (StatusCode::BAD_REQUEST, "CONFIGURATION_ERROR", msg.clone())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Storage(err) => {
                    tracing::error!(error = %err, "Storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORAGE_ERROR",
                        "A storage error occurred".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Failed {
                status,
                message,
                source,
            } => {
                tracing::error!(error = %source, retryable = source.is_retryable(), "{message}");
                (*status, "STORAGE_ERROR", message.to_string())
            }
        };

        let body = json!({
            "status": "error",
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
