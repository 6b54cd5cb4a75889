//! Initialization of the HTTP clients and startup-time verification.

use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use serenity::all::CurrentUser;
use serenity::http::Http;

use crate::{
    config::Config,
    error::{config::ConfigError, AppError},
    service::discord::http_status,
    state::OAuth2Client,
};

/// Builds the HTTP client used for the OAuth2 identity fetch.
///
/// Redirects are disabled so a malicious redirect chain cannot pivot the
/// client to an internal address.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}

/// Builds the OAuth2 client for the Discord consent flow.
///
/// # Returns
/// - `Ok(Some(client))` - Client secret and redirect URL are configured
/// - `Ok(None)` - Onboarding is not configured; the dashboard still runs
/// - `Err(ConfigError::InvalidUrl)` - An endpoint or redirect URL failed to parse
pub fn setup_oauth_client(config: &Config) -> Result<Option<OAuth2Client>, ConfigError> {
    let (Some(client_secret), Some(redirect_url)) = (
        config.discord_client_secret.as_ref(),
        config.discord_redirect_url.as_ref(),
    ) else {
        return Ok(None);
    };

    let auth_url = AuthUrl::new(config.discord_auth_url.clone()).map_err(|source| {
        ConfigError::InvalidUrl {
            name: "discord_auth_url".to_string(),
            source,
        }
    })?;
    let token_url = TokenUrl::new(config.discord_token_url.clone()).map_err(|source| {
        ConfigError::InvalidUrl {
            name: "discord_token_url".to_string(),
            source,
        }
    })?;
    let redirect_url = RedirectUrl::new(redirect_url.clone()).map_err(|source| {
        ConfigError::InvalidUrl {
            name: "DISCORD_REDIRECT_URI".to_string(),
            source,
        }
    })?;

    let client = BasicClient::new(ClientId::new(config.discord_client_id.clone()))
        .set_client_secret(ClientSecret::new(client_secret.clone()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url);

    Ok(Some(client))
}

/// Verifies the bot token against Discord before the server starts.
///
/// The dashboard is useless with a bad token, so a 401 here is a fatal
/// configuration error and the process exits without binding a listener.
///
/// # Returns
/// - `Ok(CurrentUser)` - The bot account the token belongs to
/// - `Err(AppError::ConfigErr)` - Discord rejected the token (401)
/// - `Err(AppError::DiscordErr)` - Discord was unreachable or errored
pub async fn verify_bot_token(http: &Http) -> Result<CurrentUser, AppError> {
    match http.get_current_user().await {
        Ok(user) => {
            tracing::info!("Connected to Discord as {}", user.name);
            Ok(user)
        }
        Err(err) if http_status(&err) == Some(401) => {
            Err(ConfigError::InvalidBotToken.into())
        }
        Err(err) => Err(err.into()),
    }
}
