//! Registration, login and role enforcement.

mod common;

use axum::http::StatusCode;
use fake::{Fake, faker::internet::en::SafeEmail};
use serde_json::json;
use uuid::Uuid;

use common::spawn;

fn email() -> String {
    SafeEmail().fake()
}

#[tokio::test]
async fn test_register_login_and_me() {
    let app = spawn(false).await;
    let email = email();

    let (status, body) = app
        .post(
            "/auth/register",
            json!({
                "email": email,
                "full_name": "Pat Coach",
                "password": "correct-horse",
                "role": "coach",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "coach");
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = app
        .post(
            "/auth/login",
            json!({"email": email.to_uppercase(), "password": "correct-horse"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, me) = app.send("GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], email.to_lowercase());
    assert_eq!(me["full_name"], "Pat Coach");
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let app = spawn(false).await;
    let email = email();
    app.register(&email, "viewer").await;

    let (status, body) = app
        .post(
            "/auth/login",
            json!({"email": email, "password": "wrong-password"}),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = spawn(false).await;
    let email = email();
    app.register(&email, "viewer").await;

    let (status, body) = app
        .post(
            "/auth/register",
            json!({"email": email, "full_name": "Again", "password": "correct-horse"}),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_register_validates_input() {
    let app = spawn(false).await;

    let (status, _) = app
        .post(
            "/auth/register",
            json!({"email": email(), "full_name": "Short", "password": "abc"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/auth/register",
            json!({
                "email": email(),
                "full_name": "Owner",
                "password": "correct-horse",
                "role": "owner",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_open_access_when_auth_disabled() {
    let app = spawn(false).await;

    let (status, _) = app.post("/organizations", json!({"name": "Open"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.get("/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_rejected_even_when_auth_disabled() {
    let app = spawn(false).await;

    let (status, body) = app
        .send("GET", "/seasons", Some("not-a-jwt"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_enabled_auth_requires_token() {
    let app = spawn(true).await;

    let (status, body) = app.get("/seasons").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_token");

    let (status, _) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_enabled_auth_enforces_roles() {
    let app = spawn(true).await;
    let admin = app.register(&email(), "admin").await;
    let coach = app.register(&email(), "coach").await;
    let viewer = app.register(&email(), "viewer").await;

    let (status, _) = app.send("GET", "/seasons", Some(&viewer), None).await;
    assert_eq!(status, StatusCode::OK);

    let season = json!({
        "name": "Spring",
        "start_date": "2024-03-01",
        "end_date": "2024-05-31",
    });
    let (status, body) = app
        .send("POST", "/seasons", Some(&coach), Some(season.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let (status, body) = app
        .send("POST", "/seasons", Some(&admin), Some(season))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let season_id = body["id"].as_str().unwrap();

    let expense = json!({
        "season_id": season_id,
        "category": "equipment",
        "description": "Cones",
        "amount": "40",
        "payment_date": "2024-03-02",
    });
    let (status, _) = app
        .send("POST", "/expenses", Some(&viewer), Some(expense.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send("POST", "/expenses", Some(&coach), Some(expense))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let coach_id = app
        .state
        .jwt_service
        .validate_token(&coach)
        .unwrap()
        .user_id();
    assert_eq!(body["created_by"], coach_id.to_string());
}

#[tokio::test]
async fn test_token_with_unknown_role_is_forbidden() {
    let app = spawn(true).await;
    let token = app
        .state
        .jwt_service
        .generate_access_token(Uuid::new_v4(), None, "owner")
        .unwrap();

    let (status, _) = app
        .send(
            "POST",
            "/organizations",
            Some(&token),
            Some(json!({"name": "Nope"})),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
