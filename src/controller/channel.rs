use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::AppError,
    model::{
        api::{SelectChannelDto, SetGuildDto},
        channel::ChannelRef,
    },
    service::discord::DiscordMessageService,
    state::AppState,
};

/// Lists the text channels of the configured guild.
pub async fn list_channels(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let Some(guild_id) = state.store.guild_id().await else {
        return Err(AppError::NotFound(
            "No Discord server is configured yet. Complete onboarding or enter a server ID."
                .to_string(),
        ));
    };

    let discord_service = DiscordMessageService::new(state.discord_http.clone());
    let channels = discord_service.list_channels(guild_id).await?;

    Ok((StatusCode::OK, Json(channels)))
}

/// Persists the admin's broadcast channel selection.
pub async fn select_channel(
    State(state): State<AppState>,
    Json(dto): Json<SelectChannelDto>,
) -> Result<impl IntoResponse, AppError> {
    let channel_id = parse_snowflake(&dto.channel_id).ok_or_else(|| {
        AppError::BadRequest("Channel ID should be a numeric snowflake (17-20 digits).".to_string())
    })?;

    state
        .store
        .save_selected_channel(ChannelRef {
            channel_id,
            channel_name: dto.channel_name,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Persists a manually entered guild ID.
///
/// Used by the channel onboarding path when the guild was not captured from
/// a bot-install callback.
pub async fn set_guild(
    State(state): State<AppState>,
    Json(dto): Json<SetGuildDto>,
) -> Result<impl IntoResponse, AppError> {
    let guild_id = parse_snowflake(&dto.guild_id).ok_or_else(|| {
        AppError::BadRequest("Server ID should be a numeric snowflake (17-20 digits).".to_string())
    })?;

    state.store.save_guild_id(guild_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Parses a Discord snowflake (17-20 digits), rejecting anything else.
///
/// Serenity's ID constructors panic on zero, so IDs must be validated here
/// before they are persisted or handed to the API client.
fn parse_snowflake(value: &str) -> Option<u64> {
    let trimmed = value.trim();

    if !is_snowflake(trimmed) {
        return None;
    }

    trimmed.parse().ok().filter(|id| *id != 0)
}

/// Whether the value looks like a Discord snowflake (17-20 digits).
fn is_snowflake(value: &str) -> bool {
    (17..=20).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}
