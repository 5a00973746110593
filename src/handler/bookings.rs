use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    db::{bookingdb::BookingExt, propertydb::PropertyExt},
    dtos::bookingdtos::{
        BookingListResponseDto, BookingResponseDto, BookingStatusQueryDto, CalendarQueryDto,
        CreateBookingDto,
    },
    error::HttpError,
    middleware::SessionAuth,
    models::bookingmodel::BookingStatus,
    service::access,
    AppState,
};

pub fn bookings_handler() -> Router {
    Router::new()
        .route("/", post(create_booking))
        .route("/calendar", get(get_daily_schedule))
        .route("/:booking_id/status", patch(update_booking_status))
}

pub async fn create_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Json(body): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    let _property = app_state
        .db_client
        .get_property_by_id(body.property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    // Only a confirmed booking blocks the slot; pending requests for the
    // same timestamp may pile up until one of them is confirmed.
    let existing_booking = app_state
        .db_client
        .get_confirmed_booking_at(body.property_id, body.booking_date)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing_booking.is_some() {
        return Err(HttpError::bad_request("This time slot is already booked."));
    }

    let booking = app_state
        .db_client
        .create_booking(body.property_id, auth.user.id, body.booking_date)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        booking,
    }))
}

pub async fn get_daily_schedule(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Query(query): Query<CalendarQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    if !access::can_view_calendar(&auth.user) {
        return Err(HttpError::forbidden("Only agents can view schedules"));
    }

    let bookings = app_state
        .db_client
        .get_daily_schedule(auth.user.id, query.day)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(BookingListResponseDto {
        status: "success".to_string(),
        results: bookings.len(),
        bookings,
    }))
}

pub async fn update_booking_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Path(booking_id): Path<Uuid>,
    Query(query): Query<BookingStatusQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .db_client
        .get_booking_by_id(booking_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Booking not found"))?;

    let property = app_state
        .db_client
        .get_property_by_id(booking.property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    if !access::can_manage_booking(&auth.user, property.owner_id) {
        return Err(HttpError::forbidden(
            "You can only manage bookings for your own properties",
        ));
    }

    let new_status = BookingStatus::from_transition_str(&query.new_status).ok_or_else(|| {
        HttpError::bad_request("Invalid status. Use 'confirmed' or 'declined'.")
    })?;

    let booking = app_state
        .db_client
        .update_booking_status(booking_id, new_status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        booking,
    }))
}
