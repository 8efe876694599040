use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No game-session context (post id) is available.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl CoreError {
    /// Whether a client may safely re-issue the request that produced this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Storage(_))
    }
}
