use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::messagemodel::Message;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageDto {
    pub receiver_id: Uuid,

    #[validate(length(min = 1, message = "Message content is required"))]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponseDto {
    pub status: String,
    pub message: Message,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageListResponseDto {
    pub status: String,
    pub results: usize,
    pub messages: Vec<Message>,
}
