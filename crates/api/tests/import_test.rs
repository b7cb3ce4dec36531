//! CSV upload and template routes.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use rstest::rstest;
use tower::ServiceExt;

use common::{spawn, spawn_with_batch_size};

#[tokio::test]
async fn test_import_skips_only_the_bad_row() {
    let app = spawn(false).await;
    let csv = "name,description,website,contact_email,contact_phone,is_public\n\
               Riverside Youth Soccer,,,,,true\n\
               ,missing name,,,,\n\
               Hilltop Little League,Baseball,,,,\n";

    let (status, body) = app
        .upload("/import/organizations", "orgs.csv", csv, None)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created"], 2);
    assert_eq!(body["message"], "Imported 2 organizations");
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["row"], 3);

    let (_, body) = app.get("/organizations").await;
    assert_eq!(body["organizations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_import_expenses_checks_references() {
    let app = spawn(false).await;
    let season_id = app.create_season("Spring").await;
    let csv = format!(
        "season_id,team_id,category,description,amount,vendor,receipt_number,payment_date,notes\n\
         {season_id},,equipment,Balls,120,,,2024-03-01,\n\
         {season_id},,pizza,Team party,45,,,03/02/2024,\n\
         00000000-0000-0000-0000-000000000009,,travel,Bus,80,,,2024-03-03,\n"
    );

    let (status, body) = app
        .upload("/import/expenses", "expenses.csv", &csv, None)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created"], 2);
    assert_eq!(body["errors"][0]["row"], 4);

    let (_, body) = app.get("/expenses?category=other").await;
    let others = body["expenses"].as_array().unwrap();
    assert_eq!(others.len(), 1);
    assert_eq!(others[0]["description"], "Team party");
}

#[tokio::test]
async fn test_small_batches_import_everything() {
    let app = spawn_with_batch_size(false, 2).await;
    let mut csv = String::from("name\n");
    for i in 0..5 {
        csv.push_str(&format!("League {i}\n"));
    }

    let (status, body) = app
        .upload("/import/organizations", "orgs.csv", &csv, None)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created"], 5);
}

#[tokio::test]
async fn test_upload_must_be_csv() {
    let app = spawn(false).await;

    let (status, body) = app
        .upload("/import/organizations", "orgs.xlsx", "name\nRiverside\n", None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "File must be a CSV");
}

#[tokio::test]
async fn test_unknown_import_entity() {
    let app = spawn(false).await;

    let (status, _) = app
        .upload("/import/players", "players.csv", "name\n", None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case("teams", "name,age_group,sport,gender,max_players,registration_fee,season_id,coach_id\n")]
#[case("revenues", "season_id,team_id,category,description,amount,source,payment_date,notes\n")]
#[tokio::test]
async fn test_template_download(#[case] entity: &str, #[case] expected: &str) {
    let app = spawn(false).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/import/templates/{entity}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains(&format!("{entity}_template.csv")));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body.as_ref(), expected.as_bytes());
}

#[tokio::test]
async fn test_unknown_template_is_not_found() {
    let app = spawn(false).await;

    let (status, body) = app.get("/import/templates/players").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Template not found for players");
}
