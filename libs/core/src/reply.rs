use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message sent back through the reply API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundReply {
    Text { text: String },
}

impl OutboundReply {
    pub fn text(text: impl Into<String>) -> Self {
        OutboundReply::Text { text: text.into() }
    }
}

/// Wire body of `POST /v2/bot/message/reply`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub reply_token: String,
    pub messages: Vec<OutboundReply>,
}

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply token is empty")]
    EmptyToken,
    #[error("rate limited: {body}")]
    RateLimited { body: String },
    #[error("server error {status}: {body}")]
    Server { status: StatusCode, body: String },
    #[error("client error {status}: {body}")]
    Client { status: StatusCode, body: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Sends a reply against a single-use reply token.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn reply(&self, reply_token: &str, reply: OutboundReply) -> Result<(), ReplyError>;
}
