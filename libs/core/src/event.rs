//! Inbound webhook payloads as delivered by the LINE platform.
//!
//! Event kinds and message types are modelled as tagged unions so that the
//! dispatcher matches them exhaustively. Anything the echo bot does not act
//! on lands in an explicit `Other` variant instead of failing to parse.

use serde::{Deserialize, Serialize};

/// Body of a `POST /hook` request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WebhookRequestBody {
    /// Bot user id the events were addressed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<InboundEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundEvent {
    Message(MessageEvent),
    /// `follow`, `unfollow`, `join`, `postback`, ... The echo bot ignores them.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    /// Absent for events delivered in `standby` mode; those cannot be replied to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_token: Option<String>,
    pub message: MessageContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_event_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        text: String,
    },
    /// Stickers, images, locations and the rest.
    #[serde(other)]
    Other,
}

/// A text message that should be echoed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMessage<'a> {
    pub reply_token: &'a str,
    pub text: &'a str,
    pub webhook_event_id: Option<&'a str>,
}

impl InboundEvent {
    /// Returns the reply token and text when this is a text message event
    /// that can be replied to.
    pub fn as_text_message(&self) -> Option<TextMessage<'_>> {
        match self {
            InboundEvent::Message(MessageEvent {
                reply_token: Some(reply_token),
                message: MessageContent::Text { text, .. },
                webhook_event_id,
            }) => Some(TextMessage {
                reply_token: reply_token.as_str(),
                text: text.as_str(),
                webhook_event_id: webhook_event_id.as_deref(),
            }),
            InboundEvent::Message(MessageEvent {
                reply_token: None,
                message: MessageContent::Text { .. },
                ..
            }) => None,
            InboundEvent::Message(MessageEvent {
                message: MessageContent::Other,
                ..
            }) => None,
            InboundEvent::Other => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Message(_) => "message",
            InboundEvent::Other => "other",
        }
    }
}
