//! Fan-out of one webhook batch into reply calls.
//!
//! Every text message in the batch gets its own reply future. All of them are
//! started together and joined at a single point; a failure only affects the
//! outcome recorded for its own event.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{InboundEvent, TextMessage};
use crate::reply::{OutboundReply, ReplyError, ReplySender};

const REPLIES_SENT_COUNTER: &str = "line_replies_sent_total";
const REPLIES_FAILED_COUNTER: &str = "line_replies_failed_total";
const EVENTS_SKIPPED_COUNTER: &str = "line_events_skipped_total";

#[derive(Debug, Error)]
#[error("failed to send reply for event at index {index}: {source}")]
pub struct DispatchError {
    pub index: usize,
    #[source]
    pub source: ReplyError,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DispatchOutcome {
    Sent,
    Failed { error: String },
}

/// Outcome of one echoed event. `index` points into the original batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DispatchResult {
    pub index: usize,
    #[serde(flatten)]
    pub outcome: DispatchOutcome,
}

impl DispatchResult {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, DispatchOutcome::Failed { .. })
    }
}

/// Echoes every text message in `events` and waits for all replies to settle.
///
/// Results are ordered by event index. Skipped events have no entry.
pub async fn dispatch_events<S>(sender: &S, events: &[InboundEvent]) -> Vec<DispatchResult>
where
    S: ReplySender + ?Sized,
{
    let sends: Vec<_> = events
        .iter()
        .enumerate()
        .filter_map(|(index, event)| match event.as_text_message() {
            Some(message) => Some(dispatch_one(sender, index, message)),
            None => {
                tracing::debug!(index, kind = event.kind(), "skipping event without a text reply");
                metrics::counter!(EVENTS_SKIPPED_COUNTER).increment(1);
                None
            }
        })
        .collect();

    join_all(sends).await
}

async fn dispatch_one<S>(sender: &S, index: usize, message: TextMessage<'_>) -> DispatchResult
where
    S: ReplySender + ?Sized,
{
    let reply = OutboundReply::text(message.text);
    match sender.reply(message.reply_token, reply).await {
        Ok(()) => {
            metrics::counter!(REPLIES_SENT_COUNTER).increment(1);
            DispatchResult {
                index,
                outcome: DispatchOutcome::Sent,
            }
        }
        Err(source) => {
            let err = DispatchError { index, source };
            tracing::error!(
                error = %err,
                index,
                webhook_event_id = message.webhook_event_id.unwrap_or("n/a"),
                "reply dispatch failed"
            );
            metrics::counter!(REPLIES_FAILED_COUNTER).increment(1);
            DispatchResult {
                index,
                outcome: DispatchOutcome::Failed {
                    error: err.to_string(),
                },
            }
        }
    }
}
