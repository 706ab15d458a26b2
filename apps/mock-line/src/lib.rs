//! In-process imitation of the LINE reply endpoint.
//!
//! Reply tokens are single-use: the first reply with a token succeeds, every
//! later one is answered with `400 Invalid reply token`, as the real API does.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub const REPLY_PATH: &str = "/v2/bot/message/reply";

#[derive(Clone, Default)]
pub struct MockLine {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    access_token: Option<String>,
    used_tokens: Mutex<HashSet<String>>,
    received: Mutex<Vec<Value>>,
}

impl MockLine {
    /// `access_token` of `None` accepts any `Authorization` header.
    pub fn new(access_token: Option<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                access_token,
                ..Default::default()
            }),
        }
    }

    /// Reply bodies accepted so far, in arrival order.
    pub async fn received(&self) -> Vec<Value> {
        self.inner.received.lock().await.clone()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(REPLY_PATH, post(handle_reply))
            .with_state(self.clone())
    }

    /// Serves the mock on `listener` in a background task.
    pub fn spawn(&self, listener: TcpListener) -> JoinHandle<()> {
        let app = self.router();
        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "mock-line server stopped");
            }
        })
    }

    /// Binds an ephemeral localhost port and serves the mock there.
    pub async fn spawn_local(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        Ok((addr, self.spawn(listener)))
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        match &self.inner.access_token {
            Some(expected) => headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(|v| v == format!("Bearer {expected}"))
                .unwrap_or(false),
            None => true,
        }
    }
}

async fn handle_reply(
    State(mock): State<MockLine>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !mock.authorized(&headers) {
        tracing::warn!("mock-line rejected request with bad access token");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "message": "Authentication failed. Confirm that the access token in the authorization header is valid."
            })),
        );
    }

    let token = payload
        .get("replyToken")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let fresh = !token.is_empty() && mock.inner.used_tokens.lock().await.insert(token.clone());
    if !fresh {
        tracing::warn!(reply_token = %token, "mock-line rejected reused or empty reply token");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Invalid reply token" })),
        );
    }

    tracing::info!(reply_token = %token, "LINE REPLY: {}", payload["messages"]);
    mock.inner.received.lock().await.push(payload);
    (StatusCode::OK, Json(json!({})))
}
