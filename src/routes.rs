use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handler::{
        admin::admin_handler, auth::auth_handler, bookings::bookings_handler,
        messages::messages_handler, properties::properties_handler, reviews::reviews_handler,
        users::users_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/properties", properties_handler())
        .nest("/bookings", bookings_handler().layer(middleware::from_fn(auth)))
        .nest("/reviews", reviews_handler())
        .nest("/messages", messages_handler().layer(middleware::from_fn(auth)))
        .nest("/admin", admin_handler().layer(middleware::from_fn(auth)))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state.clone()));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
        .nest_service(
            "/static/uploads",
            ServeDir::new(app_state.env.upload_dir.clone()),
        )
}
