use axum::{Json, http::StatusCode, response::IntoResponse};
use echo_core::DispatchResult;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Success,
    Error,
}

/// Final answer to one webhook delivery, built after every reply settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResponse {
    pub status: BatchStatus,
    pub results: Vec<DispatchResult>,
}

impl BatchResponse {
    /// Any failed reply turns the whole delivery into an error; the results
    /// still list every outcome.
    pub fn from_results(results: Vec<DispatchResult>) -> Self {
        let status = if results.iter().any(DispatchResult::is_failure) {
            BatchStatus::Error
        } else {
            BatchStatus::Success
        };
        Self { status, results }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.status {
            BatchStatus::Success => StatusCode::OK,
            BatchStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BatchResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Fixed liveness payload.
pub fn connected() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "success", "message": "connected successfully" })),
    )
}
