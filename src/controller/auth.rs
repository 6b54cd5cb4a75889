//! The onboarding flow: mode choice, consent redirect, and callback.
//!
//! The flow is a four-state machine: `ChoosingMode` (the page) →
//! `AwaitingConsent` (redirected to Discord) → `Authorized` (callback with a
//! valid code) → `Registered` (recipient upserted). Any failure after the
//! mode choice is terminal for the attempt: the browser is sent back to the
//! mode-choice page with an inline error, and nothing is stored.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    error::{oauth::OAuthError, AppError},
    model::recipient::{DeliveryMode, Recipient},
    service::oauth::DiscordAuthService,
    state::AppState,
};

/// Session key for the CSRF token
static SESSION_OAUTH_CSRF_TOKEN: &str = "oauth:csrf_token";
/// Session key for the delivery mode chosen before the consent redirect
static SESSION_ONBOARDING_MODE: &str = "oauth:delivery_mode";

#[derive(Deserialize)]
pub struct LoginParams {
    /// Delivery mode the user chose on the onboarding page.
    pub mode: DeliveryMode,
}

/// Query parameters of the OAuth callback endpoint.
///
/// All optional: Discord omits `code` when consent fails, and `guild_id` is
/// only present for the bot-install flow.
#[derive(Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    /// CSRF state token to be validated against the session value.
    pub state: Option<String>,
    pub guild_id: Option<String>,
    /// Discord's error code, e.g. `access_denied` when the user cancels.
    pub error: Option<String>,
}

/// `ChoosingMode -> AwaitingConsent`: stores the chosen mode and a fresh CSRF
/// token in the session, then redirects the browser to the Discord consent
/// screen.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    params: Query<LoginParams>,
) -> Result<impl IntoResponse, AppError> {
    let Some(oauth_client) = state.oauth_client.as_ref() else {
        return Err(OAuthError::Disabled.into());
    };

    let auth_service = DiscordAuthService::new(&state.http_client, oauth_client);
    let (url, csrf_token) = auth_service.login_url();

    session
        .insert(SESSION_OAUTH_CSRF_TOKEN, csrf_token.secret())
        .await?;
    session
        .insert(SESSION_ONBOARDING_MODE, params.0.mode)
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// `AwaitingConsent -> Authorized -> Registered`: handles the browser coming
/// back from Discord.
///
/// OAuth failures never surface as API errors here: the user is looking at
/// a full-page redirect, so they are sent back to the onboarding page with
/// the failure inline. Anything else (store failure, session backend down)
/// propagates as a regular error response.
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    params: Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    match register_recipient(&state, &session, params.0).await {
        Ok(recipient) => Ok(Redirect::temporary(&page_url(
            "connected",
            &recipient.display_name,
        ))),
        Err(AppError::OAuthErr(err)) => {
            tracing::warn!("Onboarding failed: {}", err);
            Ok(Redirect::temporary(&page_url("error", err.user_message())))
        }
        Err(err) => Err(err),
    }
}

/// Runs the fallible part of the callback so `callback` can convert every
/// `OAuthError` into a redirect.
async fn register_recipient(
    state: &AppState,
    session: &Session,
    params: CallbackParams,
) -> Result<Recipient, AppError> {
    let Some(oauth_client) = state.oauth_client.as_ref() else {
        return Err(OAuthError::Disabled.into());
    };

    // Consume the pending state up front: a failed attempt resets the flow
    // completely and a replayed callback finds nothing to validate against.
    let delivery_mode: Option<DeliveryMode> = session.remove(SESSION_ONBOARDING_MODE).await?;
    let stored_csrf: Option<String> = session.remove(SESSION_OAUTH_CSRF_TOKEN).await?;

    if let Some(error) = params.error {
        return Err(OAuthError::ConsentDenied(error).into());
    }

    let code = params.code.ok_or(OAuthError::MissingCode)?;
    let delivery_mode = delivery_mode.ok_or(OAuthError::SessionExpired)?;

    validate_csrf(stored_csrf, params.state.as_deref())?;

    let auth_service = DiscordAuthService::new(&state.http_client, oauth_client);
    let user = auth_service.callback(code).await?;

    let recipient = Recipient::from_discord_user(&user, delivery_mode);
    state.store.upsert_recipient(recipient.clone()).await?;

    tracing::info!(
        "Onboarded {} ({}) with mode {:?}",
        recipient.display_name,
        recipient.discord_user_id,
        recipient.delivery_mode,
    );

    // The bot-install flow reports which guild the bot was added to; capture
    // it so the admin can list channels without entering the ID by hand.
    if let Some(guild_id) = params.guild_id.as_deref().and_then(|id| id.parse().ok()) {
        state.store.save_guild_id(guild_id).await?;
    }

    Ok(recipient)
}

fn validate_csrf(stored: Option<String>, received: Option<&str>) -> Result<(), OAuthError> {
    match (stored, received) {
        (Some(stored), Some(received)) if stored == received => Ok(()),
        _ => Err(OAuthError::CsrfValidationFailed),
    }
}

/// Builds a page URL carrying one query parameter, value URL-encoded.
fn page_url(key: &str, value: &str) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();

    format!("/?{query}")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::http::{header, StatusCode};
    use serenity::http::Http;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::{config::Config, service::feed::MessageFeed, startup, store::SignalStore};

    /// Application state with a configured OAuth2 client, backed by a store
    /// file inside the given temp directory.
    async fn onboarding_state(dir: &tempfile::TempDir) -> AppState {
        let config = Config::from_lookup(|name| {
            let vars: HashMap<&str, &str> = [
                ("DISCORD_BOT_TOKEN", "token"),
                ("DISCORD_CLIENT_ID", "123456789012345678"),
                ("DISCORD_CLIENT_SECRET", "secret"),
                ("DISCORD_REDIRECT_URI", "http://localhost:8501/api/auth/callback"),
            ]
            .into_iter()
            .collect();
            vars.get(name).map(|v| v.to_string())
        })
        .unwrap();

        let store = Arc::new(
            SignalStore::open(&dir.path().join("signalboard.json"))
                .await
                .unwrap(),
        );

        AppState::new(
            store,
            Arc::new(MessageFeed::new()),
            startup::setup_reqwest_client().unwrap(),
            startup::setup_oauth_client(&config).unwrap(),
            Arc::new(Http::new("test-token")),
            "signalbot".to_string(),
        )
    }

    /// Tests the callback arriving without an authorization code.
    ///
    /// Verifies that a callback carrying no `code` sends the browser back to
    /// the onboarding page with an inline error and registers nothing, rather
    /// than surfacing an API error to a full-page redirect.
    ///
    /// Expected: temporary redirect to /?error=..., empty store
    #[tokio::test]
    async fn callback_without_code_redirects_with_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = onboarding_state(&dir).await;
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        let params = CallbackParams {
            code: None,
            state: None,
            guild_id: None,
            error: None,
        };

        let response = callback(State(state.clone()), session, Query(params))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        assert!(location.starts_with("/?error="));

        assert!(state.store.recipients().await.is_empty());
    }

    /// Tests the callback after the user cancels the consent screen.
    ///
    /// Expected: temporary redirect to /?error=..., empty store
    #[tokio::test]
    async fn callback_with_denied_consent_resets_flow() {
        let dir = tempfile::tempdir().unwrap();
        let state = onboarding_state(&dir).await;
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        let params = CallbackParams {
            code: None,
            state: None,
            guild_id: None,
            error: Some("access_denied".to_string()),
        };

        let response = callback(State(state.clone()), session, Query(params))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        assert!(location.starts_with("/?error="));

        assert!(state.store.recipients().await.is_empty());
    }

    /// Tests CSRF validation outcomes.
    ///
    /// Verifies that only a matching pair passes; a missing session value,
    /// missing parameter, or mismatch all fail.
    ///
    /// Expected: Ok only for the exact match
    #[test]
    fn validates_csrf_pairs() {
        assert!(validate_csrf(Some("abc".to_string()), Some("abc")).is_ok());
        assert!(validate_csrf(Some("abc".to_string()), Some("xyz")).is_err());
        assert!(validate_csrf(None, Some("abc")).is_err());
        assert!(validate_csrf(Some("abc".to_string()), None).is_err());
    }

    /// Tests page URL construction with values needing encoding.
    ///
    /// Expected: query value percent-encoded
    #[test]
    fn encodes_page_url() {
        assert_eq!(page_url("connected", "Trader Joe"), "/?connected=Trader+Joe");
        assert_eq!(page_url("error", "a&b"), "/?error=a%26b");
    }
}
