use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{messagedb::MessageExt, userdb::UserExt},
    dtos::messagedtos::{MessageListResponseDto, MessageResponseDto, SendMessageDto},
    error::HttpError,
    middleware::SessionAuth,
    AppState,
};

pub fn messages_handler() -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/inbox", get(get_inbox))
        .route("/chat/:other_user_id", get(get_conversation))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let receiver = app_state
        .db_client
        .get_user(Some(body.receiver_id), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Receiver not found"))?;

    if receiver.id == auth.user.id {
        return Err(HttpError::bad_request(
            "You cannot send messages to yourself",
        ));
    }

    let message = app_state
        .db_client
        .send_message(auth.user.id, body.receiver_id, body.content)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(MessageResponseDto {
        status: "success".to_string(),
        message,
    }))
}

pub async fn get_inbox(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .db_client
        .get_inbox(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(MessageListResponseDto {
        status: "success".to_string(),
        results: messages.len(),
        messages,
    }))
}

pub async fn get_conversation(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Path(other_user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .db_client
        .get_conversation(auth.user.id, other_user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(MessageListResponseDto {
        status: "success".to_string(),
        results: messages.len(),
        messages,
    }))
}
