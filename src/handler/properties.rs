use std::{path::Path as FsPath, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::propertydb::{PropertyExt, PropertySearchFilters},
    dtos::propertydtos::{
        CreatePropertyDto, ImageUploadResponseDto, PropertyDetailResponseDto,
        PropertyListResponseDto, PropertyResponseDto, PropertySearchQueryDto,
    },
    error::HttpError,
    middleware::{auth, SessionAuth},
    service::access::{self, ListingDenied},
    AppState,
};

pub fn properties_handler() -> Router {
    // Browsing is open; everything that mutates (or is per-user) sits
    // behind the session middleware.
    let public_routes = Router::new()
        .route("/", get(search_properties))
        .route("/:property_id", get(get_property_details));

    let protected_routes = Router::new()
        .route("/", post(create_property))
        .route("/favorites/me", get(get_my_favorites))
        .route("/:property_id", delete(delete_property))
        .route("/:property_id/upload-image", post(upload_image))
        .route(
            "/:property_id/favorite",
            post(add_favorite).delete(remove_favorite),
        )
        .layer(middleware::from_fn(auth));

    public_routes.merge(protected_routes)
}

pub async fn search_properties(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<PropertySearchQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let filters = PropertySearchFilters {
        title: query.title,
        property_type: query.prop_type,
        location: query.location,
        max_price: query.max_price,
    };

    let properties = app_state
        .db_client
        .search_properties(filters)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PropertyListResponseDto {
        status: "success".to_string(),
        results: properties.len(),
        properties,
    }))
}

pub async fn get_property_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    let images = app_state
        .db_client
        .get_property_images(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PropertyDetailResponseDto {
        status: "success".to_string(),
        property,
        images,
    }))
}

pub async fn create_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Json(body): Json<CreatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    match access::can_create_listing(&auth.user) {
        Ok(()) => {}
        Err(ListingDenied::NotAgent) => {
            return Err(HttpError::forbidden(
                "Permission denied: Only agents can create listings",
            ));
        }
        Err(ListingDenied::NotVerified) => {
            return Err(HttpError::forbidden(
                "Account not verified: Please wait for admin approval",
            ));
        }
    }

    let property = app_state
        .db_client
        .create_property(
            body.title,
            body.description,
            body.price,
            body.property_type,
            body.location,
            auth.user.id,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PropertyResponseDto {
        status: "success".to_string(),
        property,
    }))
}

pub async fn delete_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Path(property_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property listing not found"))?;

    if !access::can_manage_property(&auth.user, property.owner_id) {
        return Err(HttpError::forbidden(
            "Permission denied: You are not the owner of this listing",
        ));
    }

    let images = app_state
        .db_client
        .get_property_images(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Best-effort file cleanup; a missing or locked file must not block
    // the delete itself.
    for image in &images {
        let file_path = image.url.trim_start_matches('/');
        if let Err(err) = tokio::fs::remove_file(file_path).await {
            tracing::warn!("failed to delete image file {}: {}", image.url, err);
        }
    }

    app_state
        .db_client
        .delete_property(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_image(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Path(property_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    if property.owner_id != auth.user.id {
        return Err(HttpError::forbidden(
            "Permission denied: You do not own this property",
        ));
    }

    let field = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(e.to_string()))?
        .ok_or_else(|| HttpError::bad_request("No file provided"))?;

    let file_extension = field
        .file_name()
        .and_then(|name| FsPath::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();

    let data = field
        .bytes()
        .await
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let upload_dir = &app_state.env.upload_dir;
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|_| HttpError::server_error("Could not save file"))?;

    let unique_filename = format!("{}{}", Uuid::new_v4(), file_extension);
    let file_path = format!("{}/{}", upload_dir, unique_filename);

    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|_| HttpError::server_error("Could not save file"))?;

    let image = app_state
        .db_client
        .save_property_image(property_id, format!("/{}", file_path))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ImageUploadResponseDto {
        status: "success".to_string(),
        message: "Image uploaded successfully".to_string(),
        url: image.url,
    }))
}

pub async fn add_favorite(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Path(property_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let _property = app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Property not found"))?;

    let existing = app_state
        .db_client
        .get_favorite(auth.user.id, property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::bad_request("Property is already in favorites"));
    }

    app_state
        .db_client
        .add_favorite(auth.user.id, property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(crate::dtos::userdtos::Response {
        status: "success",
        message: "Property added to favorites".to_string(),
    }))
}

pub async fn remove_favorite(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
    Path(property_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let removed = app_state
        .db_client
        .remove_favorite(auth.user.id, property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if removed == 0 {
        return Err(HttpError::not_found("Favorite not found"));
    }

    Ok(Json(crate::dtos::userdtos::Response {
        status: "success",
        message: "Property removed from favorites".to_string(),
    }))
}

pub async fn get_my_favorites(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<SessionAuth>,
) -> Result<impl IntoResponse, HttpError> {
    let properties = app_state
        .db_client
        .get_favorite_properties(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PropertyListResponseDto {
        status: "success".to_string(),
        results: properties.len(),
        properties,
    }))
}
