//! Routes of the webhook server.
//!
//! ```text
//! GET  /      -> fixed "connected successfully" payload
//! POST /hook  -> signature check, echo every text message, one aggregate reply
//! ```

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use echo_core::{ReplySender, WebhookRequestBody, dispatch_events};
use echo_ingress_common::{
    BatchResponse, LineSignatureConfig, RequestId, connected, verify_line_signature,
    with_request_id,
};
use tracing::Instrument;

/// Shared, read-only handles. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub sender: Arc<dyn ReplySender>,
}

impl AppState {
    pub fn new(sender: Arc<dyn ReplySender>) -> Self {
        Self { sender }
    }
}

pub fn build_router(state: AppState, signature: LineSignatureConfig) -> Router {
    let hook = Router::new()
        .route("/hook", post(handle_hook))
        .layer(middleware::from_fn(verify_line_signature))
        .layer(Extension(signature));

    Router::new()
        .route("/", get(status))
        .merge(hook)
        .layer(middleware::from_fn(with_request_id))
        .with_state(state)
}

async fn status() -> impl IntoResponse {
    connected()
}

async fn handle_hook(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(body): Json<WebhookRequestBody>,
) -> BatchResponse {
    let rid = request_id
        .map(|Extension(id)| id.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    let span = tracing::info_span!(
        "hook.handle",
        request_id = %rid,
        events = body.events.len()
    );

    async move {
        let results = dispatch_events(state.sender.as_ref(), &body.events).await;
        let response = BatchResponse::from_results(results);
        let failed = response.results.iter().filter(|r| r.is_failure()).count();
        if failed > 0 {
            tracing::warn!(
                replies = response.results.len(),
                failed,
                "webhook batch settled with failures"
            );
        } else {
            tracing::info!(replies = response.results.len(), "webhook batch settled");
        }
        response
    }
    .instrument(span)
    .await
}
