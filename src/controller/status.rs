use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{error::AppError, model::api::StatusDto, state::AppState};

/// Bootstrap data for the page: bot identity, onboarding availability, and
/// the current targeting state.
pub async fn get_status(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let status = StatusDto {
        bot_name: state.bot_name.clone(),
        oauth_enabled: state.oauth_client.is_some(),
        recipient_count: state.store.recipients().await.len(),
        guild_configured: state.store.guild_id().await.is_some(),
        selected_channel: state.store.selected_channel().await,
    };

    Ok((StatusCode::OK, Json(status)))
}
