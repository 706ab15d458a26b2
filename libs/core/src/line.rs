//! HTTP client for the LINE Messaging API reply endpoint.

use async_trait::async_trait;
use reqwest::{StatusCode, header};

use crate::reply::{OutboundReply, ReplyError, ReplyRequest, ReplySender};

pub const DEFAULT_API_BASE: &str = "https://api.line.me";
pub const REPLY_PATH: &str = "/v2/bot/message/reply";

#[derive(Clone)]
pub struct LineClient {
    http: reqwest::Client,
    api_base: String,
    access_token: String,
}

impl LineClient {
    pub fn new(
        access_token: impl Into<String>,
        api_base: Option<String>,
    ) -> Result<Self, ReplyError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("line-echo/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http(http, access_token, api_base))
    }

    pub fn with_http(
        http: reqwest::Client,
        access_token: impl Into<String>,
        api_base: Option<String>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.into()),
            access_token: access_token.into(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn reply_url(&self) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), REPLY_PATH)
    }
}

#[async_trait]
impl ReplySender for LineClient {
    async fn reply(&self, reply_token: &str, reply: OutboundReply) -> Result<(), ReplyError> {
        if reply_token.is_empty() {
            return Err(ReplyError::EmptyToken);
        }
        let payload = ReplyRequest {
            reply_token: reply_token.to_string(),
            messages: vec![reply],
        };
        tracing::debug!(url = %self.reply_url(), "sending line reply");
        let res = self
            .http
            .post(self.reply_url())
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.access_token),
            )
            .json(&payload)
            .send()
            .await?;

        classify_response(res).await
    }
}

async fn classify_response(res: reqwest::Response) -> Result<(), ReplyError> {
    let status = res.status();
    if status.is_success() {
        return Ok(());
    }

    let body = res.text().await.unwrap_or_else(|_| "<empty>".to_string());

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ReplyError::RateLimited { body });
    }

    if status.is_server_error() {
        return Err(ReplyError::Server { status, body });
    }

    Err(ReplyError::Client { status, body })
}
