use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use murmur_types::api::{MessageUpdate, NewMessage};
use murmur_types::models::Message;

use crate::auth::AppState;
use crate::blocking;
use crate::error::ApiError;

/// POST /messages
pub async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<NewMessage>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let Json(req) = payload?;
    let message = blocking(move || state.messages.create_message(&req)).await?;
    Ok(Json(message))
}

/// GET /messages
pub async fn get_all_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = blocking(move || state.messages.get_all_messages()).await?;
    Ok(Json(messages))
}

/// GET /messages/{message_id} — the message, or 200 with an empty body.
pub async fn get_message_by_id(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let message = blocking(move || state.messages.get_message_by_id(message_id)).await?;
    Ok(present_or_empty(message))
}

/// DELETE /messages/{message_id} — `1` if a row was removed, otherwise 200
/// with an empty body.
pub async fn delete_message_by_id(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let deleted = blocking(move || state.messages.delete_message_by_id(message_id)).await?;
    Ok(present_or_empty(deleted))
}

/// PATCH /messages/{message_id}
pub async fn update_message_by_id(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    payload: Result<Json<MessageUpdate>, JsonRejection>,
) -> Result<Json<usize>, ApiError> {
    let Json(req) = payload?;
    let updated = blocking(move || state.messages.update_message_by_id(message_id, &req)).await?;
    Ok(Json(updated))
}

/// GET /accounts/{account_id}/messages
pub async fn get_messages_by_account_id(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages =
        blocking(move || state.messages.get_messages_by_account_id(account_id)).await?;
    Ok(Json(messages))
}

fn present_or_empty<T: serde::Serialize>(value: Option<T>) -> Response {
    match value {
        Some(v) => Json(v).into_response(),
        None => StatusCode::OK.into_response(),
    }
}
