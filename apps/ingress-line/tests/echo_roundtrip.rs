use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use echo_core::LineClient;
use echo_ingress_common::{LINE_SIGNATURE_HEADER, LineSignatureConfig, line_signature};
use echo_ingress_line::http::{AppState, build_router};
use echo_mock_line::MockLine;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "roundtrip-secret";
const ACCESS_TOKEN: &str = "roundtrip-token";

fn signed_hook(body: &Value) -> Request<Body> {
    let raw = body.to_string();
    let sig = line_signature(SECRET, raw.as_bytes()).unwrap();
    Request::builder()
        .method("POST")
        .uri("/hook")
        .header("content-type", "application/json")
        .header(LINE_SIGNATURE_HEADER, sig)
        .body(Body::from(raw))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// Webhook -> dispatcher -> LineClient -> mock reply API over real HTTP.
// Skips if binding to localhost is not permitted in the current environment.
#[tokio::test]
async fn webhook_batch_is_echoed_through_reply_api() {
    let mock = MockLine::new(Some(ACCESS_TOKEN.into()));
    let (addr, server) = match mock.spawn_local().await {
        Ok(bound) => bound,
        Err(err) => {
            eprintln!("skipping webhook_batch_is_echoed_through_reply_api: {err}");
            return;
        }
    };

    let client = LineClient::new(ACCESS_TOKEN, Some(format!("http://{addr}"))).unwrap();
    let app = build_router(
        AppState::new(Arc::new(client)),
        LineSignatureConfig {
            channel_secret: SECRET.into(),
        },
    );

    let body = json!({
        "destination": "Ubot",
        "events": [
            {"type": "message", "replyToken": "tok-a", "message": {"type": "text", "id": "1", "text": "hello"}},
            {"type": "follow", "replyToken": "tok-f"},
            {"type": "message", "replyToken": "tok-b", "message": {"type": "text", "id": "2", "text": "world"}}
        ]
    });

    let resp = app.clone().oneshot(signed_hook(&body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({
            "status": "success",
            "results": [
                {"index": 0, "status": "sent"},
                {"index": 2, "status": "sent"}
            ]
        })
    );

    let mut received = mock.received().await;
    received.sort_by(|a, b| a["replyToken"].as_str().cmp(&b["replyToken"].as_str()));
    assert_eq!(
        received,
        vec![
            json!({"replyToken": "tok-a", "messages": [{"type": "text", "text": "hello"}]}),
            json!({"replyToken": "tok-b", "messages": [{"type": "text", "text": "world"}]}),
        ]
    );

    // Redelivery is not deduplicated: the platform rejects the spent tokens.
    let resp = app.oneshot(signed_hook(&body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = body_json(resp).await;
    assert_eq!(payload["status"], "error");
    let results = payload["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r["status"] == "failed"));
    assert_eq!(mock.received().await.len(), 2);

    server.abort();
}
