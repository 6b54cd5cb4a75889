use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::AppError,
    model::{api::SendMessageDto, message::DeliveryTarget},
    service::{delivery::DeliveryService, discord::DiscordMessageService},
    state::AppState,
};

/// Discord's hard limit on message content length.
const MAX_MESSAGE_LENGTH: usize = 2000;

/// Sends a signal to a recipient or the selected channel.
///
/// Validates the body before any network call, resolves the target against
/// the store, and returns the resulting `MessageRecord`, including failed
/// sends, which come back as a 200 with `status: failed` so the page renders
/// them inline rather than as a request error.
pub async fn send_message(
    State(state): State<AppState>,
    Json(dto): Json<SendMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    if dto.body.trim().is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty.".to_string()));
    }

    if dto.body.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Message is longer than {MAX_MESSAGE_LENGTH} characters."
        )));
    }

    let target = resolve_target(&state, dto.recipient_id).await?;

    let sender = DiscordMessageService::new(state.discord_http.clone());
    let record = DeliveryService::new(&sender, &state.feed)
        .deliver(target, dto.body)
        .await;

    Ok((StatusCode::OK, Json(record)))
}

/// Returns the feed of recent delivery attempts, newest first.
///
/// The page polls this on a fixed timer and overwrites its displayed list.
pub async fn feed(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let records = state.feed.recent().await;

    Ok((StatusCode::OK, Json(records)))
}

/// Resolves the delivery target: a registered recipient when an ID was given,
/// otherwise the channel currently selected in the store.
async fn resolve_target(
    state: &AppState,
    recipient_id: Option<String>,
) -> Result<DeliveryTarget, AppError> {
    match recipient_id {
        Some(id) => {
            let user_id = id
                .parse::<u64>()
                .map_err(|_| AppError::BadRequest("Invalid recipient ID".to_string()))?;

            let Some(recipient) = state.store.recipient(user_id).await else {
                return Err(AppError::NotFound(format!(
                    "No registered recipient with ID {user_id}"
                )));
            };

            Ok(DeliveryTarget::User {
                user_id: recipient.discord_user_id,
                display_name: recipient.display_name,
            })
        }
        None => state
            .store
            .selected_channel()
            .await
            .map(DeliveryTarget::Channel)
            .ok_or_else(|| {
                AppError::BadRequest("No channel selected. Pick a channel first.".to_string())
            }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serenity::http::Http;

    use super::*;
    use crate::{service::feed::MessageFeed, store::SignalStore};

    async fn test_state(dir: &tempfile::TempDir) -> AppState {
        let store = Arc::new(
            SignalStore::open(&dir.path().join("signalboard.json"))
                .await
                .unwrap(),
        );

        AppState::new(
            store,
            Arc::new(MessageFeed::new()),
            reqwest::Client::new(),
            None,
            Arc::new(Http::new("test-token")),
            "signalbot".to_string(),
        )
    }

    /// Tests that a whitespace-only body is rejected before any send.
    ///
    /// Verifies the validation runs ahead of target resolution and the
    /// Discord client, leaving the feed untouched.
    ///
    /// Expected: Err(AppError::BadRequest), empty feed
    #[tokio::test]
    async fn rejects_blank_body() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;

        let dto = SendMessageDto {
            recipient_id: None,
            body: "   \n".to_string(),
        };
        let result = send_message(State(state.clone()), Json(dto)).await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg.contains("empty")));
        assert!(state.feed.recent().await.is_empty());
    }

    /// Tests that a body over Discord's 2000-character limit is rejected.
    ///
    /// Expected: Err(AppError::BadRequest) naming the limit, empty feed
    #[tokio::test]
    async fn rejects_over_long_body() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;

        let dto = SendMessageDto {
            recipient_id: None,
            body: "a".repeat(MAX_MESSAGE_LENGTH + 1),
        };
        let result = send_message(State(state.clone()), Json(dto)).await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg.contains("2000")));
        assert!(state.feed.recent().await.is_empty());
    }

    /// Tests sending with no recipient and no selected channel.
    ///
    /// Expected: Err(AppError::BadRequest) asking for a channel selection
    #[tokio::test]
    async fn rejects_send_without_target() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;

        let dto = SendMessageDto {
            recipient_id: None,
            body: "BUY AAPL".to_string(),
        };
        let result = send_message(State(state), Json(dto)).await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg.contains("channel")));
    }
}
