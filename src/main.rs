mod config;
mod controller;
mod error;
mod model;
mod router;
mod service;
mod startup;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use serenity::http::Http;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{
    config::Config,
    error::{config::ConfigError, AppError},
    service::feed::MessageFeed,
    state::AppState,
    store::SignalStore,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signalboard=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    if !config.oauth_enabled() {
        tracing::warn!(
            "DISCORD_CLIENT_SECRET / DISCORD_REDIRECT_URI not set; onboarding is disabled"
        );
    }

    let store = Arc::new(SignalStore::open(&config.store_path).await?);
    let feed = Arc::new(MessageFeed::new());
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;

    // Fail closed on a bad token before binding anything.
    let discord_http = Arc::new(Http::new(&config.bot_token));
    let bot_user = startup::verify_bot_token(&discord_http).await?;

    let state = AppState::new(
        store,
        feed,
        http_client,
        oauth_client,
        discord_http,
        bot_user.name.clone(),
    );

    // In-memory sessions only carry the short-lived onboarding state across
    // the consent redirect; losing them on restart is fine.
    let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

    let app = router::router()
        .with_state(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| ConfigError::InvalidEnvVar("SIGNALBOARD_HOST".to_string()))?;

    tracing::info!("Signalboard listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
