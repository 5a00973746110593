use std::sync::Arc;

use axum::{
    extract::Path,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{propertydb::PropertyExt, reviewdb::ReviewExt},
    dtos::reviewdtos::{CreateReviewDto, ReviewListResponseDto, ReviewResponseDto},
    error::HttpError,
    middleware::{auth, SessionAuth},
    models::reviewmodel,
    AppState,
};

pub fn reviews_handler() -> Router {
    let public_routes =
        Router::new().route("/property/:property_id", get(get_property_reviews));

    let protected_routes = Router::new()
        .route("/", post(create_review))
        .layer(middleware::from_fn(auth));

    public_routes.merge(protected_routes)
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Json(body): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let _property = app_state
        .db_client
        .get_property_by_id(body.property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    let existing_review = app_state
        .db_client
        .get_review_by_author(body.property_id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing_review.is_some() {
        return Err(HttpError::bad_request(
            "You have already reviewed this property.",
        ));
    }

    // DTO validation already bounds the rating; checked again here so the
    // rule holds even for callers that bypass the DTO layer.
    if !reviewmodel::rating_in_bounds(body.rating) {
        return Err(HttpError::bad_request("Rating must be between 1 and 5."));
    }

    let review = app_state
        .db_client
        .create_review(body.property_id, auth.user.id, body.rating, body.comment)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ReviewResponseDto {
        status: "success".to_string(),
        review,
    }))
}

pub async fn get_property_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_property_reviews(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ReviewListResponseDto {
        status: "success".to_string(),
        results: reviews.len(),
        reviews,
    }))
}
