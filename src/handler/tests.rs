use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use crate::{
    config::Config,
    db::{db::DBClient, propertydb::PropertyExt, userdb::UserExt},
    models::{
        propertymodel::{Property, PropertyType},
        usermodel::{User, UserRole},
    },
    routes::create_router,
    AppState,
};

fn test_app(pool: PgPool) -> (Router, Arc<AppState>) {
    let config = Config {
        database_url: String::new(),
        port: 0,
        upload_dir: "static/uploads".to_string(),
    };
    let app_state = Arc::new(AppState::new(DBClient::new(pool), config));
    (create_router(app_state.clone()), app_state)
}

async fn seed_user(db: &DBClient, username: &str, role: UserRole, verified: bool) -> User {
    let user = db
        .save_user(
            format!("{}@example.com", username),
            username.to_string(),
            "Test".to_string(),
            "User".to_string(),
            "not-a-real-hash".to_string(),
            role,
        )
        .await
        .unwrap();

    if verified {
        db.verify_user(user.id).await.unwrap()
    } else {
        user
    }
}

async fn seed_property(db: &DBClient, owner: &User) -> Property {
    db.create_property(
        "Two-bedroom flat".to_string(),
        "Spacious and bright.".to_string(),
        1200.0,
        PropertyType::Rent,
        "Sofia".to_string(),
        owner.id,
    )
    .await
    .unwrap()
}

fn json_request(method: &str, uri: &str, session: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(username) = session {
        builder = builder.header(header::COOKIE, format!("username={}", username));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(username) = session {
        builder = builder.header(header::COOKIE, format!("username={}", username));
    }
    builder.body(Body::empty()).unwrap()
}

async fn response_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn registration_body() -> Value {
    json!({
        "email": "tester@example.com",
        "username": "tester",
        "first_name": "Test",
        "last_name": "Er",
        "password": "secret1",
        "role": "client",
    })
}

#[sqlx::test]
async fn register_rejects_duplicate_identity(pool: PgPool) {
    let (app, app_state) = test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/register", None, &registration_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/register", None, &registration_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Email or Username already exists");

    // The failed attempt must not have touched the store.
    assert_eq!(app_state.db_client.get_user_count().await.unwrap(), 1);
}

#[sqlx::test]
async fn register_rejects_admin_role(pool: PgPool) {
    let (app, app_state) = test_app(pool);

    let mut body = registration_body();
    body["role"] = json!("admin");

    let response = app
        .oneshot(json_request("POST", "/api/auth/register", None, &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid role selection");
    assert_eq!(app_state.db_client.get_user_count().await.unwrap(), 0);
}

#[sqlx::test]
async fn login_sets_session_cookie_and_identity_is_reflected(pool: PgPool) {
    let (app, _app_state) = test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/register", None, &registration_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({"username": "tester", "password": "secret1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("username=tester"));
    assert!(set_cookie.contains("HttpOnly"));

    let response = app
        .oneshot(empty_request("GET", "/api/users/me", Some("tester")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["user"]["username"], "tester");
    assert_eq!(body["data"]["user"]["role"], "client");
}

#[sqlx::test]
async fn login_with_wrong_password_is_generic_unauthorized(pool: PgPool) {
    let (app, _app_state) = test_app(pool);

    app.clone()
        .oneshot(json_request("POST", "/api/auth/register", None, &registration_body()))
        .await
        .unwrap();

    for login in [
        json!({"username": "tester", "password": "wrong"}),
        json!({"username": "nobody", "password": "secret1"}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/login", None, &login))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = response_json(response).await;
        assert_eq!(body["message"], "Invalid username or password");
    }
}

#[sqlx::test]
async fn unverified_agent_cannot_create_listing(pool: PgPool) {
    let (app, app_state) = test_app(pool);
    seed_user(&app_state.db_client, "agent", UserRole::Agent, false).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/properties",
            Some("agent"),
            &json!({
                "title": "Two-bedroom flat",
                "description": "Spacious and bright.",
                "price": 1200.0,
                "property_type": "rent",
                "location": "Sofia",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = response_json(response).await;
    assert_eq!(
        body["message"],
        "Account not verified: Please wait for admin approval"
    );
}

#[sqlx::test]
async fn confirmed_slot_blocks_duplicate_booking(pool: PgPool) {
    let (app, app_state) = test_app(pool);
    let agent = seed_user(&app_state.db_client, "agent", UserRole::Agent, true).await;
    seed_user(&app_state.db_client, "client", UserRole::Client, false).await;
    let property = seed_property(&app_state.db_client, &agent).await;

    let booking_body = json!({
        "property_id": property.id,
        "booking_date": "2026-05-20T10:00:00Z",
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/bookings", Some("client"), &booking_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["booking"]["status"], "pending");
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();

    // A pending booking does not hold the slot; an identical request is
    // still accepted.
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/bookings", Some("client"), &booking_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request(
            "PATCH",
            &format!("/api/bookings/{}/status?new_status=confirmed", booking_id),
            Some("agent"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["booking"]["status"], "confirmed");

    // Once confirmed, the exact same property+timestamp is taken.
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/bookings", Some("client"), &booking_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "This time slot is already booked.");

    // A different minute on the same day never conflicts.
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            Some("client"),
            &json!({
                "property_id": property.id,
                "booking_date": "2026-05-20T10:05:00Z",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test]
async fn non_owner_cannot_update_booking_status(pool: PgPool) {
    let (app, app_state) = test_app(pool);
    let agent = seed_user(&app_state.db_client, "agent", UserRole::Agent, true).await;
    seed_user(&app_state.db_client, "intruder", UserRole::Agent, true).await;
    seed_user(&app_state.db_client, "client", UserRole::Client, false).await;
    let property = seed_property(&app_state.db_client, &agent).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            Some("client"),
            &json!({"property_id": property.id, "booking_date": "2026-05-20T10:00:00Z"}),
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(empty_request(
            "PATCH",
            &format!("/api/bookings/{}/status?new_status=confirmed", booking_id),
            Some("intruder"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = response_json(response).await;
    assert_eq!(
        body["message"],
        "You can only manage bookings for your own properties"
    );
}

#[sqlx::test]
async fn second_review_by_same_author_conflicts(pool: PgPool) {
    let (app, app_state) = test_app(pool);
    let agent = seed_user(&app_state.db_client, "agent", UserRole::Agent, true).await;
    seed_user(&app_state.db_client, "client", UserRole::Client, false).await;
    let property = seed_property(&app_state.db_client, &agent).await;

    let review_body = json!({
        "property_id": property.id,
        "rating": 5,
        "comment": "Great viewing.",
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/reviews", Some("client"), &review_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request("POST", "/api/reviews", Some("client"), &review_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "You have already reviewed this property.");
}

#[sqlx::test]
async fn cannot_message_yourself(pool: PgPool) {
    let (app, app_state) = test_app(pool);
    let user = seed_user(&app_state.db_client, "loner", UserRole::Client, false).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/messages",
            Some("loner"),
            &json!({"receiver_id": user.id, "content": "hello me"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "You cannot send messages to yourself");
}

#[sqlx::test]
async fn verify_user_conflicts_when_already_verified(pool: PgPool) {
    let (app, app_state) = test_app(pool);
    seed_user(&app_state.db_client, "admin", UserRole::Admin, true).await;
    let agent = seed_user(&app_state.db_client, "agent", UserRole::Agent, false).await;

    let response = app
        .clone()
        .oneshot(empty_request(
            "PATCH",
            &format!("/api/admin/verify/{}", agent.id),
            Some("admin"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["user"]["is_verified"], true);

    let response = app
        .oneshot(empty_request(
            "PATCH",
            &format!("/api/admin/verify/{}", agent.id),
            Some("admin"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "User is already verified");
}

#[sqlx::test]
async fn admin_routes_reject_non_admins(pool: PgPool) {
    let (app, app_state) = test_app(pool);
    let client = seed_user(&app_state.db_client, "client", UserRole::Client, false).await;

    let cases = [
        (
            empty_request("GET", "/api/admin/stats", Some("client")),
            "Access denied: Administrative privileges required",
        ),
        (
            empty_request(
                "PATCH",
                &format!("/api/admin/verify/{}", client.id),
                Some("client"),
            ),
            "Permission denied: Insufficient privileges",
        ),
        (
            empty_request("GET", "/api/admin/reviews", Some("client")),
            "Admin access required",
        ),
        (
            empty_request("GET", "/api/admin/bookings", Some("client")),
            "Admin access required",
        ),
    ];

    for (request, expected_message) in cases {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = response_json(response).await;
        assert_eq!(body["message"], expected_message);
    }
}

#[sqlx::test]
async fn missing_session_cookie_is_unauthorized(pool: PgPool) {
    let (app, _app_state) = test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/api/messages/inbox", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "User not authenticated");
}

#[sqlx::test]
async fn property_details_read_is_idempotent(pool: PgPool) {
    let (app, app_state) = test_app(pool);
    let agent = seed_user(&app_state.db_client, "agent", UserRole::Agent, true).await;
    let property = seed_property(&app_state.db_client, &agent).await;

    let uri = format!("/api/properties/{}", property.id);
    let first = response_json(
        app.clone()
            .oneshot(empty_request("GET", &uri, None))
            .await
            .unwrap(),
    )
    .await;
    let second = response_json(app.oneshot(empty_request("GET", &uri, None)).await.unwrap()).await;
    assert_eq!(first, second);
    assert_eq!(first["property"]["title"], "Two-bedroom flat");
}
