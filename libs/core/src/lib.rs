//! Core contracts for the LINE echo bot.
//!
//! This crate holds the inbound webhook event model, the reply contract
//! (`ReplySender`) with its LINE Messaging API implementation, and the
//! dispatcher that turns a webhook batch into concurrent replies.
pub mod dispatch;
pub mod event;
pub mod line;
pub mod reply;

pub use dispatch::{DispatchError, DispatchOutcome, DispatchResult, dispatch_events};
pub use event::{InboundEvent, MessageContent, MessageEvent, TextMessage, WebhookRequestBody};
pub use line::LineClient;
pub use reply::{OutboundReply, ReplyError, ReplyRequest, ReplySender};
