use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures in the OAuth2 onboarding flow.
///
/// Any of these is terminal for the current onboarding attempt: the flow
/// resets to the mode-selection page with the message from
/// [`OAuthError::user_message`], and no recipient is registered.
#[derive(Error, Debug)]
pub enum OAuthError {
    /// Onboarding was requested but `DISCORD_CLIENT_SECRET` /
    /// `DISCORD_REDIRECT_URI` are not configured.
    #[error("OAuth2 onboarding is not configured")]
    Disabled,

    /// Discord redirected back with an error instead of a code, typically
    /// `access_denied` when the user cancels the consent screen.
    #[error("Discord consent was not granted: {0}")]
    ConsentDenied(String),

    /// The callback URL carried no `code` query parameter.
    #[error("OAuth2 callback is missing the authorization code")]
    MissingCode,

    /// The CSRF state in the callback URL does not match the value stored in
    /// the session, indicating a forged or stale callback request.
    #[error("OAuth2 callback failed CSRF state validation")]
    CsrfValidationFailed,

    /// The session no longer holds the pending onboarding state, e.g. the
    /// callback arrived after the session expired or in a different browser.
    #[error("No onboarding in progress for this session")]
    SessionExpired,

    /// The authorization code exchange was rejected (invalid or expired code).
    #[error("Failed to exchange authorization code: {0}")]
    ExchangeFailed(String),

    /// The identity request with the obtained access token failed at the
    /// transport level.
    #[error("Failed to fetch the authorized user: {0}")]
    IdentityFetch(#[from] reqwest::Error),

    /// Discord rejected the access token when fetching the user's identity.
    #[error("Discord rejected the access token ({0}) while fetching the user")]
    IdentityRejected(u16),
}

impl OAuthError {
    /// Short message shown inline on the onboarding page.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Disabled => "Onboarding is not configured on this server. Ask the administrator to set DISCORD_CLIENT_SECRET and DISCORD_REDIRECT_URI.",
            Self::ConsentDenied(_) => "Discord authorization was cancelled. You can try again whenever you like.",
            Self::MissingCode | Self::CsrfValidationFailed | Self::SessionExpired => {
                "There was an issue connecting your Discord account, please try again."
            }
            Self::ExchangeFailed(_) | Self::IdentityFetch(_) | Self::IdentityRejected(_) => {
                "Discord could not confirm your account, please try again."
            }
        }
    }
}

/// Converts OAuth errors into HTTP responses.
///
/// Only reached by API calls outside the browser callback (the callback
/// handler redirects instead). `Disabled` maps to 503 since the feature is
/// intentionally unavailable; everything else is a 400 for this attempt.
impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        tracing::warn!("{}", self);

        let status = match self {
            Self::Disabled => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorDto {
                error: self.user_message().to_string(),
            }),
        )
            .into_response()
    }
}
