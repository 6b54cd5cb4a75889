//! The delivery workflow: one send attempt, outcome recorded for the feed.

use serenity::all::MessageId;
use serenity::async_trait;

use crate::{
    error::delivery::DeliveryError,
    model::message::{DeliveryTarget, MessageRecord},
    service::feed::MessageFeed,
};

/// The Discord send seam.
///
/// Implemented by `DiscordMessageService` for the live API; tests substitute
/// a stub so delivery semantics are exercised without network access.
#[async_trait]
pub trait SignalSender {
    async fn send_direct_message(
        &self,
        user_id: u64,
        text: &str,
    ) -> Result<MessageId, DeliveryError>;

    async fn send_channel_message(
        &self,
        channel_id: u64,
        text: &str,
    ) -> Result<MessageId, DeliveryError>;
}

pub struct DeliveryService<'a, S: SignalSender> {
    sender: &'a S,
    feed: &'a MessageFeed,
}

impl<'a, S: SignalSender> DeliveryService<'a, S> {
    pub fn new(sender: &'a S, feed: &'a MessageFeed) -> Self {
        Self { sender, feed }
    }

    /// Attempts a single delivery and records the outcome.
    ///
    /// Chooses the direct-message or channel send by target variant. A failed
    /// send is captured in the returned record, never re-raised, so the
    /// dashboard renders failures inline. No retries.
    ///
    /// # Arguments
    /// - `target` - Resolved recipient or channel
    /// - `body` - Message text, already validated by the controller
    ///
    /// # Returns
    /// - `MessageRecord` - Status Ok with the Discord message ID, or Failed
    ///   with an inline error message
    pub async fn deliver(&self, target: DeliveryTarget, body: String) -> MessageRecord {
        let result = match &target {
            DeliveryTarget::User { user_id, .. } => {
                self.sender.send_direct_message(*user_id, &body).await
            }
            DeliveryTarget::Channel(channel) => {
                self.sender
                    .send_channel_message(channel.channel_id, &body)
                    .await
            }
        };

        let record = match result {
            Ok(message_id) => {
                tracing::info!("Sent message {} to {}", message_id, target.label());
                MessageRecord::ok(target, body, message_id.get())
            }
            Err(err) => {
                tracing::warn!("Delivery to {} failed: {}", target.label(), err);
                MessageRecord::failed(target, body, err.user_message())
            }
        };

        self.feed.push(record.clone()).await;

        record
    }
}
