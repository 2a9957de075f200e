use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use innkeep_api::{app, AppState, AuthConfig};
use async_trait::async_trait;
use innkeep_core::repository::{RepoResult, RoomRepository, UserRepository};
use innkeep_shared::{NewRoom, ProfileUpdate, User};
use innkeep_store::MemoryStore;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    state: AppState,
    store: Arc<MemoryStore>,
}

fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_store(
        store.clone(),
        AuthConfig {
            secret: "test-secret".to_string(),
            expiration: 900,
        },
    );
    TestApp {
        router: app(state.clone()),
        state,
        store,
    }
}

impl TestApp {
    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn token(&self, email: &str) -> String {
        self.state.tokens.issue(email, false).unwrap()
    }

    async fn seed_room(&self, price: i64) -> Uuid {
        self.store
            .create_room(&NewRoom {
                title: "Ocean View".to_string(),
                description: "Balcony over the bay".to_string(),
                price: Decimal::from(price),
                room_type: "double".to_string(),
                images: vec![],
            })
            .await
            .unwrap()
            .id
    }
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn bare_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn booking_body(room_id: &str, start: &str, end: &str) -> Value {
    json!({
        "room_id": room_id,
        "start_date": start,
        "end_date": end,
        "guest_name": "A",
        "guest_phone": "123",
    })
}

#[tokio::test]
async fn test_booking_three_nights() {
    let app = test_app();
    let room_id = app.seed_room(100).await;
    let token = app.token("guest@example.com");

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/book",
            Some(&token),
            booking_body(&room_id.to_string(), "2024-06-01", "2024-06-04"),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_price"], 300.0);
    assert_eq!(body["message"], "Booking successful");
    assert_eq!(body["status"], "Booked");
    assert!(Uuid::parse_str(body["booking_id"].as_str().unwrap()).is_ok());

    let (status, listed) = app
        .send(bare_request(Method::GET, "/bookings", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["user_email"], "guest@example.com");
    assert_eq!(listed[0]["start_date"], "2024-06-01");
    assert_eq!(listed[0]["num_guests"], 1);
    assert_eq!(listed[0]["payment_method"], "Credit Card");
    assert_eq!(listed[0]["_id"], body["booking_id"]);
}

#[tokio::test]
async fn test_booking_inverted_dates_is_422_and_not_stored() {
    let app = test_app();
    let room_id = app.seed_room(100).await;
    let token = app.token("guest@example.com");

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/book",
            Some(&token),
            booking_body(&room_id.to_string(), "2024-06-05", "2024-06-01"),
        ))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Check-out date must be after check-in date");
    assert_eq!(app.store.booking_count().await, 0);
}

#[tokio::test]
async fn test_booking_bad_date_format_is_422() {
    let app = test_app();
    let room_id = app.seed_room(100).await;
    let token = app.token("guest@example.com");

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/book",
            Some(&token),
            booking_body(&room_id.to_string(), "06/01/2024", "2024-06-04"),
        ))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid date format. Use YYYY-MM-DD");
}

#[tokio::test]
async fn test_booking_lists_every_missing_field() {
    let app = test_app();
    let token = app.token("guest@example.com");

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/book",
            Some(&token),
            json!({ "guest_name": "A" }),
        ))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "Missing required fields: room_id, start_date, end_date, guest_phone"
    );
}

#[tokio::test]
async fn test_booking_without_body_is_422() {
    let app = test_app();
    let token = app.token("guest@example.com");

    let (status, body) = app
        .send(bare_request(Method::POST, "/book", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "No data provided");
}

#[tokio::test]
async fn test_booking_invalid_room_id_and_unknown_room() {
    let app = test_app();
    let token = app.token("guest@example.com");

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/book",
            Some(&token),
            booking_body("R1", "2024-06-01", "2024-06-04"),
        ))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid room ID format");

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/book",
            Some(&token),
            booking_body(&Uuid::new_v4().to_string(), "2024-06-01", "2024-06-04"),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Room not found");
    assert_eq!(app.store.booking_count().await, 0);
}

#[tokio::test]
async fn test_booking_requires_valid_token() {
    let app = test_app();
    let room_id = app.seed_room(100).await;
    let body = booking_body(&room_id.to_string(), "2024-06-01", "2024-06-04");

    let (status, response) = app
        .send(json_request(Method::POST, "/book", None, body.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(response["error"].is_string());

    let (status, _) = app
        .send(json_request(Method::POST, "/book", Some("not.a.jwt"), body))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.booking_count().await, 0);
}

#[tokio::test]
async fn test_repeated_booking_creates_two_records() {
    let app = test_app();
    let room_id = app.seed_room(100).await;
    let token = app.token("guest@example.com");
    let body = booking_body(&room_id.to_string(), "2024-06-01", "2024-06-04");

    let (first_status, first) = app
        .send(json_request(Method::POST, "/book", Some(&token), body.clone()))
        .await;
    let (second_status, second) = app
        .send(json_request(Method::POST, "/book", Some(&token), body))
        .await;

    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(second_status, StatusCode::CREATED);
    assert_ne!(first["booking_id"], second["booking_id"]);
    assert_eq!(app.store.booking_count().await, 2);
}

#[tokio::test]
async fn test_room_crud() {
    let app = test_app();

    let (status, created) = app
        .send(json_request(
            Method::POST,
            "/rooms",
            None,
            json!({
                "title": "Attic",
                "description": "Cosy",
                "price": 80.5,
                "type": "single",
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Room created successfully");
    assert_eq!(created["room"]["is_available"], true);
    assert_eq!(created["room"]["images"], json!([]));
    let room_id = created["room"]["_id"].as_str().unwrap().to_string();

    let (status, rooms) = app.send(bare_request(Method::GET, "/rooms", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rooms.as_array().unwrap().len(), 1);

    let (status, room) = app
        .send(bare_request(Method::GET, &format!("/rooms/{}", room_id), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room["price"], 80.5);
    assert_eq!(room["type"], "single");

    let (status, body) = app
        .send(bare_request(Method::DELETE, &format!("/rooms/{}", room_id), None))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = app
        .send(bare_request(Method::GET, &format!("/rooms/{}", room_id), None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Room not found");

    let (status, _) = app
        .send(bare_request(Method::GET, "/rooms/not-an-id", None))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

/// Users repository whose lookup never sees existing accounts, as when a
/// concurrent registration lands between lookup and insert.
struct StaleLookupUsers(Arc<MemoryStore>);

#[async_trait]
impl UserRepository for StaleLookupUsers {
    async fn find_by_email(&self, _email: &str) -> RepoResult<Option<User>> {
        Ok(None)
    }

    async fn create_user(&self, user: &User) -> RepoResult<bool> {
        self.0.create_user(user).await
    }

    async fn update_profile(&self, email: &str, update: &ProfileUpdate) -> RepoResult<Option<User>> {
        self.0.update_profile(email, update).await
    }
}

#[tokio::test]
async fn test_register_race_reports_existing_user() {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        store.clone(),
        store.clone(),
        Arc::new(StaleLookupUsers(store.clone())),
        store.clone(),
        AuthConfig {
            secret: "test-secret".to_string(),
            expiration: 900,
        },
    );
    let app = TestApp {
        router: app(state.clone()),
        state,
        store,
    };
    let register = || {
        json_request(
            Method::POST,
            "/auth/register",
            None,
            json!({
                "email": "ada@example.com",
                "password": "hunter2",
                "name": "Ada",
                "phone": "123",
            }),
        )
    };

    let (status, _) = app.send(register()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.send(register()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn test_register_login_and_profile() {
    let app = test_app();

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/auth/register",
            None,
            json!({
                "email": "ada@example.com",
                "password": "hunter2",
                "name": "Ada",
                "phone": "123",
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["address"], "");
    assert!(body["user"].get("password").is_none());

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/auth/register",
            None,
            json!({
                "email": "ada@example.com",
                "password": "x",
                "name": "Ada",
                "phone": "123",
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/auth/login",
            None,
            json!({ "email": "ada@example.com", "password": "wrong" }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/auth/login",
            None,
            json!({ "email": "ada@example.com", "password": "hunter2" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_admin"], false);
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, profile) = app
        .send(bare_request(Method::GET, "/profile", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email"], "ada@example.com");
    assert_eq!(profile["name"], "Ada");

    let (status, profile) = app
        .send(json_request(
            Method::PUT,
            "/profile",
            Some(&token),
            json!({ "address": "12 Byron Row" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["address"], "12 Byron Row");
    assert_eq!(profile["phone"], "123");
}

#[tokio::test]
async fn test_register_reports_missing_fields() {
    let app = test_app();

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/auth/register",
            None,
            json!({ "email": "ada@example.com", "name": "" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: password, name, phone");
}

#[tokio::test]
async fn test_profile_of_unknown_user_is_404() {
    let app = test_app();
    let token = app.token("ghost@example.com");

    let (status, body) = app
        .send(bare_request(Method::GET, "/profile", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_contact_form() {
    let app = test_app();

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/contact",
            None,
            json!({
                "name": "Grace",
                "email": "grace@example.com",
                "phone": "555",
                "message": "Do you allow pets?",
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["message"],
        "Your inquiry has been received! We'll get back to you soon."
    );
    let stored = app.store.contacts().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id.to_string(), body["contact_id"].as_str().unwrap());

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/contact",
            None,
            json!({ "name": "Grace", "message": "" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: email, phone, message");

    let (status, body) = app
        .send(json_request(Method::POST, "/contact", None, json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data provided");
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = app.send(bare_request(Method::GET, "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
