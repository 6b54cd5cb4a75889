use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{error::AppError, state::AppState};

/// Lists registered recipients for the admin's target picker.
pub async fn list_recipients(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let recipients = state.store.recipients().await;

    Ok((StatusCode::OK, Json(recipients)))
}
