use anyhow::{Result, anyhow};
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const LINE_SIGNATURE_HEADER: &str = "x-line-signature";
const MAX_BODY_BYTES: usize = 1024 * 1024;

type HmacSha256 = Hmac<Sha256>;

/// Channel secret used to check `x-line-signature`. Installed as a request
/// extension in front of [`verify_line_signature`].
#[derive(Clone, Default)]
pub struct LineSignatureConfig {
    pub channel_secret: String,
}

/// Rejects requests whose body was not signed with the channel secret.
///
/// The body is buffered, checked and handed on unchanged.
pub async fn verify_line_signature(req: Request<Body>, next: Next) -> Response {
    let Some(cfg) = req.extensions().get::<LineSignatureConfig>().cloned() else {
        tracing::error!("line signature config missing from request extensions");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let (parts, body) = req.into_parts();
    let provided_sig = parts
        .headers
        .get(LINE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if provided_sig.is_empty() {
        tracing::warn!("line webhook request without signature");
        return (StatusCode::UNAUTHORIZED, "missing signature").into_response();
    }

    let body_bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "failed to read webhook body");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    if let Err(err) = verify_signature(&cfg.channel_secret, &body_bytes, &provided_sig) {
        tracing::warn!(error = %err, "invalid line signature");
        return (StatusCode::UNAUTHORIZED, "invalid signature").into_response();
    }

    let req = Request::from_parts(parts, Body::from(body_bytes));
    next.run(req).await
}

/// Base64 HMAC-SHA256 of `body` keyed with `channel_secret`.
pub fn line_signature(channel_secret: &str, body: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())?;
    mac.update(body);
    Ok(B64.encode(mac.finalize().into_bytes()))
}

fn verify_signature(channel_secret: &str, body: &[u8], sig_hdr: &str) -> Result<()> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())?;
    mac.update(body);
    let provided = B64.decode(sig_hdr)?;
    mac.verify_slice(&provided)
        .map_err(|_| anyhow!("signature mismatch"))
}
