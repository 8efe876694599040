//! Shared response envelope types for API handlers.

use serde::Serialize;

/// `{ "status": "success" }` acknowledgement for write endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self { status: "success" }
    }
}
