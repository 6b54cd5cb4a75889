//! Sent-message records for the dashboard feed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{channel::ChannelRef, snowflake};

/// Where a message was sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeliveryTarget {
    /// Direct message to an onboarded recipient.
    User {
        #[serde(with = "snowflake")]
        user_id: u64,
        display_name: String,
    },
    /// Broadcast to the admin-selected channel.
    Channel(ChannelRef),
}

impl DeliveryTarget {
    /// Human-readable target label for logs and the feed.
    pub fn label(&self) -> String {
        match self {
            Self::User { display_name, .. } => display_name.clone(),
            Self::Channel(channel) => format!("#{}", channel.channel_name),
        }
    }
}

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Ok,
    Failed,
}

/// One entry of the feed.
///
/// Ephemeral by design: records live in a bounded in-memory list and are not
/// persisted across restarts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRecord {
    pub target: DeliveryTarget,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub status: DeliveryStatus,
    /// Discord's ID for the created message, present on success.
    #[serde(with = "snowflake::option", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<u64>,
    /// Inline failure message, present when the send was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageRecord {
    pub fn ok(target: DeliveryTarget, body: String, message_id: u64) -> Self {
        Self {
            target,
            body,
            sent_at: Utc::now(),
            status: DeliveryStatus::Ok,
            message_id: Some(message_id),
            error: None,
        }
    }

    pub fn failed(target: DeliveryTarget, body: String, error: String) -> Self {
        Self {
            target,
            body,
            sent_at: Utc::now(),
            status: DeliveryStatus::Failed,
            message_id: None,
            error: Some(error),
        }
    }
}
