//! Discord channel references.

use serde::{Deserialize, Serialize};
use serenity::all::GuildChannel;

use crate::model::snowflake;

/// A guild text channel as presented to the admin.
///
/// Fetched transiently from the Discord API when listing channels; only the
/// admin's selected channel is persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    /// Discord channel ID (snowflake), serialized as a string.
    #[serde(with = "snowflake")]
    pub channel_id: u64,
    pub channel_name: String,
}

impl From<&GuildChannel> for ChannelRef {
    fn from(channel: &GuildChannel) -> Self {
        Self {
            channel_id: channel.id.get(),
            channel_name: channel.name.clone(),
        }
    }
}
