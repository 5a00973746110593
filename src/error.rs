use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorMessage {
    #[error("Server Error. Please try again later")]
    ServerError,
    #[error("Invalid username or password")]
    WrongCredentials,
    #[error("Email or Username already exists")]
    EmailOrUsernameExist,
    #[error("Invalid role selection")]
    InvalidRoleSelection,
    #[error("User not authenticated")]
    UserNotAuthenticated,
    #[error("User not found")]
    UserNotFound,
    #[error("Password cannot be empty")]
    EmptyPassword,
    #[error("Password must not be more than {0} characters")]
    ExceededMaxPasswordLength(usize),
    #[error("Invalid password hash format")]
    InvalidHashFormat,
    #[error("Error while hashing password")]
    HashingError,
}

#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
    pub status: StatusCode,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        HttpError {
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::UNAUTHORIZED)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::FORBIDDEN)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::NOT_FOUND)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn into_http_response(self) -> axum::response::Response {
        let json_response = Json(ErrorResponse {
            status: if self.status.is_server_error() {
                "error"
            } else {
                "fail"
            },
            message: self.message.clone(),
        });

        (self.status, json_response).into_response()
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HttpError: message: {}, status: {}",
            self.message, self.status
        )
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        self.into_http_response()
    }
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_map_to_expected_status() {
        assert_eq!(HttpError::bad_request("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(HttpError::unauthorized("x").status, StatusCode::UNAUTHORIZED);
        assert_eq!(HttpError::forbidden("x").status, StatusCode::FORBIDDEN);
        assert_eq!(HttpError::not_found("x").status, StatusCode::NOT_FOUND);
        assert_eq!(
            HttpError::server_error("x").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_messages_match_api_contract() {
        assert_eq!(
            ErrorMessage::WrongCredentials.to_string(),
            "Invalid username or password"
        );
        assert_eq!(
            ErrorMessage::EmailOrUsernameExist.to_string(),
            "Email or Username already exists"
        );
        assert_eq!(
            ErrorMessage::InvalidRoleSelection.to_string(),
            "Invalid role selection"
        );
    }
}
