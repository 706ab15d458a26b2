use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tokio::net::TcpListener;

pub const DEFAULT_PORT: u16 = 8000;
pub const CALL_BODY: &str = "Express + TS Server";

pub fn build_router() -> Router {
    Router::new().route("/call", get(call))
}

async fn call() -> &'static str {
    CALL_BODY
}

/// Listen address from `PORT`, falling back to [`DEFAULT_PORT`].
pub fn bind_addr(port: Option<String>) -> Result<SocketAddr> {
    let port = match port.filter(|v| !v.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<u16>()
            .with_context(|| format!("invalid PORT {value:?}"))?,
        None => DEFAULT_PORT,
    };
    Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port))
}

pub async fn run(addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!("status-server listening on http://{}", addr);
    axum::serve(listener, build_router())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn call_returns_static_text() {
        let resp = build_router()
            .oneshot(Request::builder().uri("/call").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], CALL_BODY.as_bytes());
    }

    #[tokio::test]
    async fn other_paths_are_not_found() {
        let resp = build_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bind_addr_defaults_and_parses() {
        assert_eq!(bind_addr(None).unwrap().port(), DEFAULT_PORT);
        assert_eq!(bind_addr(Some(" ".into())).unwrap().port(), DEFAULT_PORT);
        assert_eq!(bind_addr(Some("8123".into())).unwrap().port(), 8123);
        assert!(bind_addr(Some("70000".into())).is_err());
    }
}
