//! Bot-authenticated Discord API operations.
//!
//! Thin wrapper over the Serenity HTTP client. Every operation is a single
//! network call with no retry or backoff; failures map into the domain error
//! taxonomy at this boundary.

use std::collections::HashMap;
use std::sync::Arc;

use serenity::all::{ChannelId, ChannelType, CreateMessage, GuildChannel, GuildId, MessageId, UserId};
use serenity::async_trait;
use serenity::http::{Http, HttpError};

use crate::{
    error::{auth::AuthError, delivery::DeliveryError, AppError},
    model::channel::ChannelRef,
    service::delivery::SignalSender,
};

/// Extracts the HTTP status from a serenity error, when the request reached
/// Discord at all.
pub(crate) fn http_status(err: &serenity::Error) -> Option<u16> {
    if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = err {
        return Some(response.status_code.as_u16());
    }

    None
}

pub struct DiscordMessageService {
    http: Arc<Http>,
}

impl DiscordMessageService {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Lists the text channels of a guild, ordered by Discord position.
    ///
    /// Voice, category, forum and other channel kinds are filtered out since
    /// only text channels can receive signal messages.
    ///
    /// # Arguments
    /// - `guild_id` - Discord's unique identifier for the guild (u64)
    ///
    /// # Returns
    /// - `Ok(Vec<ChannelRef>)` - Text channels in display order
    /// - `Err(AppError::AuthErr)` - The bot is not in the guild (403)
    /// - `Err(AppError::NotFound)` - The guild does not exist (404)
    /// - `Err(AppError::DiscordErr)` - Any other Discord API failure
    pub async fn list_channels(&self, guild_id: u64) -> Result<Vec<ChannelRef>, AppError> {
        let channels = GuildId::new(guild_id)
            .channels(&self.http)
            .await
            .map_err(|err| match http_status(&err) {
                Some(403) => AppError::AuthErr(AuthError::GuildAccessDenied { guild_id }),
                Some(404) => {
                    AppError::NotFound("Server not found. Check the server ID.".to_string())
                }
                _ => err.into(),
            })?;

        Ok(text_channels_sorted(&channels))
    }
}

#[async_trait]
impl SignalSender for DiscordMessageService {
    /// Sends a direct message by opening (or reusing, Discord-side) the DM
    /// channel with the user and posting into it.
    async fn send_direct_message(
        &self,
        user_id: u64,
        text: &str,
    ) -> Result<MessageId, DeliveryError> {
        let dm_channel = UserId::new(user_id)
            .create_dm_channel(&self.http)
            .await
            .map_err(DeliveryError::from_discord)?;

        let message = dm_channel
            .id
            .send_message(&self.http, CreateMessage::new().content(text))
            .await
            .map_err(DeliveryError::from_discord)?;

        Ok(message.id)
    }

    async fn send_channel_message(
        &self,
        channel_id: u64,
        text: &str,
    ) -> Result<MessageId, DeliveryError> {
        let message = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().content(text))
            .await
            .map_err(DeliveryError::from_discord)?;

        Ok(message.id)
    }
}

/// Filters a guild's channel map down to text channels in display order.
fn text_channels_sorted(channels: &HashMap<ChannelId, GuildChannel>) -> Vec<ChannelRef> {
    let mut text_channels: Vec<&GuildChannel> = channels
        .values()
        .filter(|channel| channel.kind == ChannelType::Text)
        .collect();

    // Position alone is not unique; the ID tiebreak keeps the order stable.
    text_channels.sort_by_key(|channel| (channel.position, channel.id.get()));

    text_channels.into_iter().map(ChannelRef::from).collect()
}
