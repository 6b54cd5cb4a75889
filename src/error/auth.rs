use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The bot is not a member of the requested guild or lacks permission to
    /// list its channels.
    ///
    /// Discord returned 403 Forbidden for a guild-scoped request. Results in a
    /// 403 response telling the operator to invite the bot first.
    #[error("Bot does not have access to guild {guild_id}")]
    GuildAccessDenied {
        /// The guild the request was scoped to
        guild_id: u64,
    },
}

/// Converts authentication errors into HTTP responses.
///
/// The full error is logged server-side while the client receives a short
/// actionable message for inline display.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::warn!("{}", self);

        match self {
            Self::GuildAccessDenied { .. } => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "The bot doesn't have access to this server. Add it to the server and try again.".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
