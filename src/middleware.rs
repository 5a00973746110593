use std::sync::Arc;

use axum::{extract::Request, middleware::Next, response::IntoResponse, Extension};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    db::userdb::UserExt,
    error::{ErrorMessage, HttpError},
    models::usermodel::User,
    AppState,
};

pub const SESSION_COOKIE: &str = "username";

/// The resolved session identity, injected as a request extension so every
/// handler receives the caller explicitly.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionAuth {
    pub user: User,
}

/// Resolves the session from the plaintext `username` cookie. The cookie
/// carries no signature and no expiry; this mirrors the legacy session
/// model on purpose and is a known weakness.
pub async fn auth(
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let username = cookie_jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::UserNotAuthenticated.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, Some(&username), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::UserNotFound.to_string()))?;

    req.extensions_mut().insert(SessionAuth { user });

    Ok(next.run(req).await)
}
