//! Application state shared across all request handlers.
//!
//! The state is constructed once during startup and cloned for each request
//! handler through Axum's state extraction. All fields are cheap to clone.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use serenity::http::Http;
use std::sync::Arc;

use crate::{service::feed::MessageFeed, store::SignalStore};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
#[derive(Clone)]
pub struct AppState {
    /// File-backed store of recipients, guild, and selected channel.
    pub store: Arc<SignalStore>,

    /// Bounded in-memory feed of recent delivery attempts.
    pub feed: Arc<MessageFeed>,

    /// HTTP client for the OAuth2 identity fetch.
    ///
    /// Configured with redirects disabled to prevent SSRF via redirect
    /// chains.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the Discord consent flow.
    ///
    /// `None` when `DISCORD_CLIENT_SECRET` / `DISCORD_REDIRECT_URI` are not
    /// configured; onboarding endpoints refuse to run in that case.
    pub oauth_client: Option<OAuth2Client>,

    /// Discord HTTP client for bot API operations (sends, channel listing).
    pub discord_http: Arc<Http>,

    /// Name of the bot account, resolved during startup verification.
    pub bot_name: String,
}

impl AppState {
    /// Creates the application state from dependencies initialized at startup.
    pub fn new(
        store: Arc<SignalStore>,
        feed: Arc<MessageFeed>,
        http_client: reqwest::Client,
        oauth_client: Option<OAuth2Client>,
        discord_http: Arc<Http>,
        bot_name: String,
    ) -> Self {
        Self {
            store,
            feed,
            http_client,
            oauth_client,
            discord_http,
            bot_name,
        }
    }
}
