//! Shared helpers for API tests.
//!
//! Each test drives the full router against its own in-memory `SQLite`
//! database with the real migrations applied.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sea_orm_migration::MigratorTrait;
use serde_json::{Value, json};
use tower::ServiceExt;

use huddle_api::{AppState, create_router};
use huddle_db::migration::Migrator;
use huddle_shared::JwtService;
use huddle_shared::config::JwtConfig;

pub const BOUNDARY: &str = "HUDDLE_TEST_BOUNDARY";

/// A router plus the state behind it.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Builds the app with a fresh database.
pub async fn spawn(auth_enabled: bool) -> TestApp {
    spawn_with_batch_size(auth_enabled, 500).await
}

pub async fn spawn_with_batch_size(auth_enabled: bool, batch_size: usize) -> TestApp {
    let db = huddle_db::connect("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open SQLite database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let jwt_service = JwtService::new(&JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry_secs: 3600,
    });
    let state = AppState::new(db, jwt_service)
        .with_auth(auth_enabled)
        .with_import_batch_size(batch_size);

    TestApp {
        router: create_router(state.clone()),
        state,
    }
}

impl TestApp {
    /// Sends a request and returns the status and JSON body (`Null` when empty).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(format!("/api/v1{uri}"));
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, None, Some(body)).await
    }

    /// Uploads `csv` as a multipart file field.
    pub async fn upload(
        &self,
        uri: &str,
        file_name: &str,
        csv: &str,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: text/csv\r\n\
             \r\n\
             {csv}\r\n\
             --{BOUNDARY}--\r\n"
        );
        let mut builder = Request::builder()
            .method("POST")
            .uri(format!("/api/v1{uri}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder.body(Body::from(body)).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Registers a user and returns their access token.
    pub async fn register(&self, email: &str, role: &str) -> String {
        let (status, body) = self
            .post(
                "/auth/register",
                json!({
                    "email": email,
                    "full_name": "Test User",
                    "password": "correct-horse",
                    "role": role,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn create_season(&self, name: &str) -> String {
        let (status, body) = self
            .post(
                "/seasons",
                json!({
                    "name": name,
                    "season_type": "spring",
                    "year": 2024,
                    "start_date": "2024-03-01",
                    "end_date": "2024-05-31",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "season failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_team(&self, season_id: &str, name: &str, players: i32) -> String {
        let (status, body) = self
            .post(
                "/teams",
                json!({
                    "season_id": season_id,
                    "name": name,
                    "age_group": "U10",
                    "sport": "soccer",
                    "current_players": players,
                    "registration_fee": "85",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "team failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }
}

/// Reads a money field, which is serialized as a string.
pub fn money(value: &Value) -> Decimal {
    serde_json::from_value(value.clone()).unwrap()
}
