use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{delete, get, patch},
    Extension, Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{bookingdb::BookingExt, propertydb::PropertyExt, reviewdb::ReviewExt, userdb::UserExt},
    dtos::{
        admindtos::{AdminStatsResponseDto, ContentStatsDto, SystemInfoDto, UserStatsDto},
        bookingdtos::BookingListResponseDto,
        reviewdtos::ReviewListResponseDto,
        userdtos::{FilterUserDto, Response, UserData, UserResponseDto},
    },
    error::HttpError,
    middleware::SessionAuth,
    service::access,
    AppState,
};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/stats", get(get_admin_stats))
        .route("/verify/:user_id", patch(verify_user))
        .route("/reviews", get(get_all_reviews))
        .route("/reviews/:review_id", delete(delete_review))
        .route("/bookings", get(get_all_bookings))
}

fn require_admin(auth: &SessionAuth, message: &str) -> Result<(), HttpError> {
    if !access::is_admin(&auth.user) {
        return Err(HttpError::forbidden(message));
    }
    Ok(())
}

pub async fn get_admin_stats(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth, "Access denied: Administrative privileges required")?;

    let total_users = app_state
        .db_client
        .get_user_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let verified_agents = app_state
        .db_client
        .get_agent_count(true)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let pending_verifications = app_state
        .db_client
        .get_agent_count(false)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let total_properties = app_state
        .db_client
        .get_property_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let total_bookings = app_state
        .db_client
        .get_booking_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let total_reviews = app_state
        .db_client
        .get_review_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(AdminStatsResponseDto {
        status: "success".to_string(),
        user_stats: UserStatsDto {
            total_users,
            verified_agents,
            pending_verifications,
        },
        content_stats: ContentStatsDto {
            total_properties,
            total_bookings,
            total_reviews,
        },
        system_info: SystemInfoDto {
            report_generated_at: Utc::now(),
            admin_user: auth.user.username.clone(),
        },
    }))
}

pub async fn verify_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth, "Permission denied: Insufficient privileges")?;

    let user_to_verify = app_state
        .db_client
        .get_user(Some(user_id), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Target user not found"))?;

    if user_to_verify.is_verified {
        return Err(HttpError::bad_request("User is already verified"));
    }

    let user = app_state
        .db_client
        .verify_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}

pub async fn get_all_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth, "Admin access required")?;

    let reviews = app_state
        .db_client
        .get_all_reviews()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ReviewListResponseDto {
        status: "success".to_string(),
        results: reviews.len(),
        reviews,
    }))
}

pub async fn delete_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Path(review_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth, "Admin access required")?;

    let _review = app_state
        .db_client
        .get_review_by_id(review_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Review not found"))?;

    app_state
        .db_client
        .delete_review(review_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: format!("Review {} has been deleted by admin", review_id),
    }))
}

pub async fn get_all_bookings(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth, "Admin access required")?;

    let bookings = app_state
        .db_client
        .get_all_bookings()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(BookingListResponseDto {
        status: "success".to_string(),
        results: bookings.len(),
        bookings,
    }))
}
