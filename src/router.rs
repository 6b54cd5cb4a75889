use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{
    controller::{auth, channel, message, pages, recipient, status},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/api/status", get(status::get_status))
        .route("/api/onboard/login", get(auth::login))
        .route("/api/auth/callback", get(auth::callback))
        .route("/api/recipients", get(recipient::list_recipients))
        .route("/api/channels", get(channel::list_channels))
        .route("/api/channels/select", post(channel::select_channel))
        .route("/api/guild", put(channel::set_guild))
        .route("/api/messages", post(message::send_message))
        .route("/api/feed", get(message::feed))
}
