//! Request/response DTOs for the JSON API.

use serde::{Deserialize, Serialize};

use crate::model::channel::ChannelRef;

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Bootstrap data for the dashboard page.
#[derive(Serialize)]
pub struct StatusDto {
    /// Name of the connected bot account.
    pub bot_name: String,
    /// Whether the self-service onboarding flow is configured.
    pub oauth_enabled: bool,
    pub recipient_count: usize,
    pub guild_configured: bool,
    pub selected_channel: Option<ChannelRef>,
}

/// Body of `POST /api/messages`.
///
/// Exactly one target: a registered recipient by ID, or (when absent) the
/// channel currently selected in the store.
#[derive(Deserialize)]
pub struct SendMessageDto {
    /// Discord user ID of a registered recipient, as a string.
    pub recipient_id: Option<String>,
    pub body: String,
}

/// Body of `POST /api/channels/select`.
#[derive(Deserialize)]
pub struct SelectChannelDto {
    /// Discord channel ID, as a string.
    pub channel_id: String,
    pub channel_name: String,
}

/// Body of `PUT /api/guild`.
#[derive(Deserialize)]
pub struct SetGuildDto {
    /// Discord guild ID, as a string snowflake (17-20 digits).
    pub guild_id: String,
}
