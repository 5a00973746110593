use std::sync::Arc;

use axum::{
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{FilterUserDto, LoginUserDto, RegisterUserDto, Response, UserData, UserResponseDto},
    error::{ErrorMessage, HttpError},
    middleware::SESSION_COOKIE,
    models::usermodel::UserRole,
    utils::password,
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // Admin accounts are provisioned out of band, never self-assigned.
    let role = UserRole::from_registration_str(&body.role)
        .ok_or_else(|| HttpError::bad_request(ErrorMessage::InvalidRoleSelection.to_string()))?;

    let existing_user = app_state
        .db_client
        .get_user_by_email_or_username(&body.email, &body.username)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing_user.is_some() {
        return Err(HttpError::bad_request(
            ErrorMessage::EmailOrUsernameExist.to_string(),
        ));
    }

    let hashed_password =
        password::hash(&body.password).map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = app_state
        .db_client
        .save_user(
            body.email,
            body.username,
            body.first_name,
            body.last_name,
            hashed_password,
            role,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let filtered_user = FilterUserDto::filter_user(&user);

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData { user: filtered_user },
    }))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .db_client
        .get_user(None, Some(&body.username), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Same error for unknown username and wrong password; no enumeration.
    let user = result
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    let password_matched = password::compare(&body.password, &user.password)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    if !password_matched {
        return Err(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    let cookie = Cookie::build((SESSION_COOKIE, user.username.clone()))
        .path("/")
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error(ErrorMessage::ServerError.to_string()))?,
    );

    let mut response = Json(Response {
        status: "success",
        message: "Login successful".to_string(),
    })
    .into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn logout() -> Result<impl IntoResponse, HttpError> {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error(ErrorMessage::ServerError.to_string()))?,
    );

    let mut response = Json(Response {
        status: "success",
        message: "Logged out".to_string(),
    })
    .into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}
