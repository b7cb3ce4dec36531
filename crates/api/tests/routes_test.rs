//! CRUD, summary and report routes.

mod common;

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;
use uuid::Uuid;

use common::{money, spawn};

#[tokio::test]
async fn test_health_check() {
    let app = spawn(false).await;

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn test_health_reports_database_down() {
    let app = spawn(false).await;
    (*app.state.db).clone().close().await.unwrap();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn test_season_summary_totals() {
    let app = spawn(false).await;
    let season_id = app.create_season("Spring 2024").await;

    let (status, _) = app
        .post(
            "/budgets",
            json!({"season_id": season_id, "category": "General", "budgeted_amount": "1000"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    for amount in ["300", "150"] {
        let (status, _) = app
            .post(
                "/expenses",
                json!({
                    "season_id": season_id,
                    "category": "equipment",
                    "description": "Gear",
                    "amount": amount,
                    "payment_date": "2024-03-10",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = app
        .post(
            "/revenues",
            json!({
                "season_id": season_id,
                "category": "sponsorships",
                "description": "Banner",
                "amount": 500,
                "payment_date": "2024-03-12",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .get(&format!("/budgets/summary?season_id={season_id}"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["season_name"], "Spring 2024");
    assert_eq!(money(&body["total_budgeted"]), dec!(1000));
    assert_eq!(money(&body["total_expenses"]), dec!(450));
    assert_eq!(money(&body["total_revenue"]), dec!(500));
    assert_eq!(money(&body["remaining_budget"]), dec!(550));
    assert_eq!(money(&body["profit_loss"]), dec!(50));
}

#[tokio::test]
async fn test_expense_for_team_in_other_season_is_rejected() {
    let app = spawn(false).await;
    let spring = app.create_season("Spring").await;
    let fall = app.create_season("Fall").await;
    let team_id = app.create_team(&fall, "Tigers", 10).await;

    let (status, body) = app
        .post(
            "/expenses",
            json!({
                "season_id": spring,
                "team_id": team_id,
                "category": "travel",
                "description": "Bus",
                "amount": "120",
                "payment_date": "2024-03-10",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "BUSINESS_RULE_VIOLATION");
}

#[tokio::test]
async fn test_unknown_category_is_validation_error() {
    let app = spawn(false).await;
    let season_id = app.create_season("Spring").await;

    let (status, body) = app
        .post(
            "/expenses",
            json!({
                "season_id": season_id,
                "category": "snacks",
                "description": "Orange slices",
                "amount": "15",
                "payment_date": "2024-03-10",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, _) = app.get("/revenues?category=bake_sale").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_amount_is_rejected() {
    let app = spawn(false).await;
    let season_id = app.create_season("Spring").await;

    let (status, body) = app
        .post(
            "/budgets",
            json!({"season_id": season_id, "category": "General", "budgeted_amount": "-5"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "budgeted_amount cannot be negative");
}

#[tokio::test]
async fn test_expense_list_filters_and_wrapping() {
    let app = spawn(false).await;
    let season_id = app.create_season("Spring").await;
    let team_id = app.create_team(&season_id, "Tigers", 10).await;

    for (team, category, date) in [
        (None, "equipment", "2024-03-01"),
        (Some(&team_id), "uniforms", "2024-03-20"),
        (Some(&team_id), "equipment", "2024-03-05"),
    ] {
        let (status, _) = app
            .post(
                "/expenses",
                json!({
                    "season_id": season_id,
                    "team_id": team,
                    "category": category,
                    "description": "Gear",
                    "amount": "10",
                    "payment_date": date,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = app
        .get(&format!("/expenses?team_id={team_id}"))
        .await;
    let expenses = body["expenses"].as_array().unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0]["payment_date"], "2024-03-20");

    let (_, body) = app.get("/expenses?category=equipment").await;
    assert_eq!(body["expenses"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_team_then_not_found() {
    let app = spawn(false).await;
    let season_id = app.create_season("Spring").await;
    let team_id = app.create_team(&season_id, "Tigers", 10).await;

    let (status, _) = app
        .send("DELETE", &format!("/teams/{team_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&format!("/teams/{team_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, _) = app
        .send("DELETE", &format!("/teams/{team_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_season_update_replaces_fields() {
    let app = spawn(false).await;
    let season_id = app.create_season("Spring").await;

    let (status, body) = app
        .send(
            "PUT",
            &format!("/seasons/{season_id}"),
            None,
            Some(json!({
                "name": "Fall 2024",
                "season_type": "fall",
                "start_date": "2024-09-01",
                "end_date": "2024-11-30",
                "is_active": false,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Fall 2024");
    assert_eq!(body["season_type"], "fall");
    assert_eq!(body["year"], 2024);
    assert_eq!(body["is_active"], false);

    let (_, body) = app.get("/seasons").await;
    assert_eq!(body["seasons"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_season_rejects_unknown_type_and_backwards_dates() {
    let app = spawn(false).await;

    let (status, _) = app
        .post(
            "/seasons",
            json!({
                "name": "Monsoon",
                "season_type": "monsoon",
                "start_date": "2024-06-01",
                "end_date": "2024-08-01",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/seasons",
            json!({
                "name": "Backwards",
                "start_date": "2024-12-01",
                "end_date": "2024-09-01",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_player_fee_toggle_feeds_team_summary() {
    let app = spawn(false).await;
    let season_id = app.create_season("Spring").await;
    let team_id = app.create_team(&season_id, "Tigers", 2).await;

    let (status, player) = app
        .post(
            "/players",
            json!({"team_id": team_id, "first_name": "Sam", "last_name": "Lee"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(money(&player["registration_fee_amount"]), dec!(85));
    let player_id = player["id"].as_str().unwrap();

    let (status, player) = app
        .send(
            "PUT",
            &format!("/players/{player_id}/registration-fee"),
            None,
            Some(json!({"paid": true})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(player["registration_fee_paid"], true);

    let (status, summary) = app
        .get(&format!("/budgets/team/{team_id}/summary"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["player_count"], 2);
    assert_eq!(money(&summary["registration_fees_expected"]), dec!(170));
    assert_eq!(money(&summary["registration_fees_collected"]), dec!(85));

    let (_, body) = app.get(&format!("/players?team_id={team_id}")).await;
    assert_eq!(body["players"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_quick_actions() {
    let app = spawn(false).await;
    let season_id = app.create_season("Spring").await;
    let team_id = app.create_team(&season_id, "Tigers", 0).await;

    let (status, body) = app
        .post(
            "/quick/bulk-registration-fees",
            json!({
                "team_id": team_id,
                "player_count": 15,
                "fee_per_player": "85",
                "payment_date": "2024-03-01",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(money(&body["total_amount"]), dec!(1275));

    let (_, team) = app.get(&format!("/teams/{team_id}")).await;
    assert_eq!(team["current_players"], 15);

    let (status, body) = app
        .post(
            &format!("/quick/quick-expense?category=tournament_fees&season_id={season_id}"),
            json!({
                "team_id": team_id,
                "amount": "300",
                "description": "Tournament entry",
                "payment_date": "2024-04-01",
                "player_count": 12,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(money(&body["per_player_cost"]), dec!(25));

    let expense_id = body["expense_id"].as_str().unwrap();
    let (_, expense) = app.get(&format!("/expenses/{expense_id}")).await;
    assert_eq!(
        expense["description"],
        "Tournament entry (12 players @ $25.00 each)"
    );

    let (status, _) = app
        .post(
            &format!("/quick/quick-expense?category=pizza&season_id={season_id}"),
            json!({
                "team_id": team_id,
                "amount": "40",
                "description": "Team party",
                "payment_date": "2024-04-01",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_amounts_too_large_are_rejected() {
    let app = spawn(false).await;
    let season_id = app.create_season("Spring").await;
    let team_id = app.create_team(&season_id, "Tigers", 0).await;

    let (status, body) = app
        .post(
            "/quick/bulk-registration-fees",
            json!({
                "team_id": team_id,
                "player_count": 2,
                "fee_per_player": "79228162514264337593543950335",
                "payment_date": "2024-03-01",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, _) = app
        .post(
            "/quick/bulk-registration-fees",
            json!({
                "team_id": team_id,
                "player_count": 2,
                "fee_per_player": "9999999999.99",
                "payment_date": "2024-03-01",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/expenses",
            json!({
                "season_id": season_id,
                "category": "travel",
                "description": "Charter jet",
                "amount": "10000000000",
                "payment_date": "2024-03-02",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, team) = app.get(&format!("/teams/{team_id}")).await;
    assert_eq!(team["current_players"], 0);
}

#[tokio::test]
async fn test_transparency_reports() {
    let app = spawn(false).await;
    let (status, org) = app
        .post("/organizations", json!({"name": "Riverside", "is_public": true}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let org_id = org["id"].as_str().unwrap();

    let (status, season) = app
        .post(
            "/seasons",
            json!({
                "name": "Spring",
                "organization_id": org_id,
                "start_date": "2024-03-01",
                "end_date": "2024-05-31",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let season_id = season["id"].as_str().unwrap();
    let team_id = app.create_team(season_id, "Tigers", 0).await;

    let (status, _) = app
        .post(
            "/expenses",
            json!({
                "season_id": season_id,
                "team_id": team_id,
                "category": "field_rental",
                "description": "Field",
                "amount": "200",
                "payment_date": "2024-03-10",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, costs) = app
        .get(&format!("/transparency/team/{team_id}/player-costs"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&costs["cost_per_player"]), dec!(200));

    let (status, report) = app
        .get(&format!("/transparency/organization/{org_id}/report"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["organization_name"], "Riverside");
    assert_eq!(money(&report["total_expenses"]), dec!(200));
    assert_eq!(money(&report["expenses_by_category"]["field_rental"]), dec!(200));

    let (status, report) = app
        .get(&format!("/transparency/season/{season_id}/report"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["season_name"], "Spring");

    let (status, _) = app
        .get(&format!("/transparency/organization/{}/report", Uuid::new_v4()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_organization_cascades() {
    let app = spawn(false).await;
    let (_, org) = app.post("/organizations", json!({"name": "Riverside"})).await;
    let org_id = org["id"].as_str().unwrap();
    let (_, season) = app
        .post(
            "/seasons",
            json!({
                "name": "Spring",
                "organization_id": org_id,
                "start_date": "2024-03-01",
                "end_date": "2024-05-31",
            }),
        )
        .await;
    let season_id = season["id"].as_str().unwrap();
    app.create_team(season_id, "Tigers", 10).await;

    let (status, _) = app
        .send("DELETE", &format!("/organizations/{org_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app.get("/teams").await;
    assert!(body["teams"].as_array().unwrap().is_empty());
    let (status, _) = app.get(&format!("/seasons/{season_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
