//! API integration tests
//!
//! Drive a running server backed by a migrated database. The token is minted
//! with `JWT_SECRET` (falls back to the default secret) for user 1, so a user
//! row with id 1 must exist. Membership tests need at least two users.

use chrono::{Duration, Utc};
use gearguard_server::models::user::UserClaims;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:5000/api/v1";

fn auth_token() -> String {
    let secret = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "change-this-secret-in-production".to_string());
    UserClaims::new(1, None, Duration::hours(1))
        .create_token(&secret)
        .expect("Failed to create token")
}

async fn post(client: &Client, path: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .bearer_auth(auth_token())
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED, "POST {}", path);
    response.json().await.expect("Failed to parse response")
}

async fn put(client: &Client, path: &str, body: Value) -> Value {
    let response = client
        .put(format!("{}{}", BASE_URL, path))
        .bearer_auth(auth_token())
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success(), "PUT {}", path);
    response.json().await.expect("Failed to parse response")
}

async fn get(client: &Client, path: &str) -> Value {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .bearer_auth(auth_token())
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success(), "GET {}", path);
    response.json().await.expect("Failed to parse response")
}

fn request_payload(task: &str, equipment_id: &Value, stage: &str) -> Value {
    json!({
        "task_name": task,
        "type": "Corrective",
        "equipment_id": equipment_id,
        "stage": stage
    })
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_overdue_request_leaves_stats_when_repaired() {
    let client = Client::new();

    let equipment = post(&client, "/equipment", json!({ "name": "Press1" })).await;
    let category = post(&client, "/equipment-categories", json!({ "name": "Presses" })).await;
    put(
        &client,
        &format!("/equipment/{}", equipment["id"]),
        json!({ "name": "Press1", "category_id": category["id"] }),
    )
    .await;

    let before = get(&client, "/dashboard/stats").await;

    let yesterday = (Utc::now() - Duration::days(1)).date_naive();
    let request = post(
        &client,
        "/maintenance-requests",
        json!({
            "task_name": "Leak",
            "type": "Corrective",
            "equipment_id": equipment["id"],
            "due_date": yesterday.to_string()
        }),
    )
    .await;
    assert_eq!(request["stage"], "New");
    assert_eq!(request["assigned_by"], 1);

    let details = get(&client, &format!("/maintenance-requests/{}", request["id"])).await;
    assert_eq!(details["is_overdue"], true);
    assert_eq!(details["category_name"], "Presses");

    let overdue = get(&client, "/dashboard/stats").await;
    assert_eq!(
        overdue["overdue_tasks"].as_i64().unwrap(),
        before["overdue_tasks"].as_i64().unwrap() + 1
    );

    let mut repaired = request_payload("Leak", &equipment["id"], "Repaired");
    repaired["due_date"] = json!(yesterday.to_string());
    put(&client, &format!("/maintenance-requests/{}", request["id"]), repaired).await;

    let after = get(&client, "/dashboard/stats").await;
    assert_eq!(
        after["overdue_tasks"].as_i64().unwrap(),
        overdue["overdue_tasks"].as_i64().unwrap() - 1
    );
    assert_eq!(
        after["completed_tasks"].as_i64().unwrap(),
        overdue["completed_tasks"].as_i64().unwrap() + 1
    );
}

#[tokio::test]
#[ignore]
async fn test_request_due_today_is_overdue() {
    let client = Client::new();

    let today = Utc::now().date_naive();
    let request = post(
        &client,
        "/maintenance-requests",
        json!({ "task_name": "Inspect", "type": "Preventive", "due_date": today.to_string() }),
    )
    .await;

    let details = get(&client, &format!("/maintenance-requests/{}", request["id"])).await;
    assert_eq!(details["is_overdue"], true);

    let tasks = get(&client, "/dashboard/tasks?status=overdue").await;
    assert!(tasks
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t["id"] == request["id"] && t["is_overdue"] == true));
}

#[tokio::test]
#[ignore]
async fn test_scrap_stage_mirrors_onto_equipment() {
    let client = Client::new();

    let equipment = post(&client, "/equipment", json!({ "name": "Lathe" })).await;
    let equipment_path = format!("/equipment/{}", equipment["id"]);

    let request = post(
        &client,
        "/maintenance-requests",
        request_payload("Beyond repair", &equipment["id"], "Scrap"),
    )
    .await;
    assert_eq!(get(&client, &equipment_path).await["is_scrapped"], true);

    let request_path = format!("/maintenance-requests/{}", request["id"]);
    put(&client, &request_path, request_payload("Beyond repair", &equipment["id"], "New")).await;
    let restored = get(&client, &equipment_path).await;
    assert_eq!(restored["is_scrapped"], false);
    assert!(restored["scrapped_at"].is_null());

    // Stage-only move applies the same rule
    let response = client
        .patch(format!("{}{}/stage", BASE_URL, request_path))
        .bearer_auth(auth_token())
        .json(&json!({ "stage": "Scrap" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    assert_eq!(get(&client, &equipment_path).await["is_scrapped"], true);
}

#[tokio::test]
#[ignore]
async fn test_request_inherits_equipment_team() {
    let client = Client::new();

    let team = post(&client, "/maintenance-teams", json!({ "name": "Mechanics", "member_ids": [1] })).await;
    let equipment = post(
        &client,
        "/equipment",
        json!({ "name": "Pump", "maintenance_team_id": team["id"] }),
    )
    .await;

    let request = post(
        &client,
        "/maintenance-requests",
        json!({ "task_name": "Noise", "type": "Preventive", "equipment_id": equipment["id"] }),
    )
    .await;
    assert_eq!(request["team_id"], team["id"]);
}

#[tokio::test]
#[ignore]
async fn test_hours_spent_preserved_when_omitted() {
    let client = Client::new();

    let request = post(
        &client,
        "/maintenance-requests",
        json!({ "task_name": "Calibrate", "type": "Preventive" }),
    )
    .await;
    let path = format!("/maintenance-requests/{}", request["id"]);

    let mut payload = json!({
        "task_name": "Calibrate",
        "type": "Preventive",
        "stage": "In Progress",
        "hours_spent": 5
    });
    let updated = put(&client, &path, payload.clone()).await;
    assert_eq!(updated["hours_spent"].as_f64(), Some(5.0));

    payload.as_object_mut().unwrap().remove("hours_spent");
    let kept = put(&client, &path, payload).await;
    assert_eq!(kept["hours_spent"].as_f64(), Some(5.0));
}

#[tokio::test]
#[ignore]
async fn test_team_update_replaces_membership() {
    let client = Client::new();

    let users = get(&client, "/users").await;
    let user_ids: Vec<i64> = users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert!(user_ids.len() >= 2, "needs at least two seeded users");
    let (a, b) = (user_ids[0], user_ids[1]);

    let team = post(&client, "/maintenance-teams", json!({ "name": "Electricians", "member_ids": [a] })).await;
    let path = format!("/maintenance-teams/{}", team["id"]);

    let member_ids = |details: &Value| -> Vec<i64> {
        let mut ids: Vec<i64> = details["members"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_i64().unwrap())
            .collect();
        ids.sort_unstable();
        ids
    };

    // A different non-empty set replaces the old one entirely
    put(&client, &path, json!({ "name": "Electricians", "member_ids": [b] })).await;
    assert_eq!(member_ids(&get(&client, &path).await), vec![b]);

    put(&client, &path, json!({ "name": "Electricians", "member_ids": [a, b, a] })).await;
    let mut both = vec![a, b];
    both.sort_unstable();
    assert_eq!(member_ids(&get(&client, &path).await), both);

    put(&client, &path, json!({ "name": "Electricians", "member_ids": [] })).await;
    let details = get(&client, &path).await;
    assert_eq!(details["members"].as_array().unwrap().len(), 0);

    // Unknown user: the whole update rolls back
    let response = client
        .put(format!("{}{}", BASE_URL, path))
        .bearer_auth(auth_token())
        .json(&json!({ "name": "Renamed", "member_ids": [a, 999999] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let details = get(&client, &path).await;
    assert_eq!(details["name"], "Electricians");
    assert_eq!(details["members"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_report_partitions_requests() {
    let client = Client::new();

    for group_by in ["team", "category"] {
        let rows = get(&client, &format!("/dashboard/reports?group_by={}", group_by)).await;
        for row in rows.as_array().unwrap() {
            let total = row["request_count"].as_i64().unwrap();
            let parts = row["completed_count"].as_i64().unwrap()
                + row["open_count"].as_i64().unwrap()
                + row["scrap_count"].as_i64().unwrap();
            assert_eq!(parts, total);
        }
    }

    let response = client
        .get(format!("{}/dashboard/reports?group_by=department", BASE_URL))
        .bearer_auth(auth_token())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_missing_request_not_found() {
    let client = Client::new();

    let response = client
        .put(format!("{}/maintenance-requests/999999", BASE_URL))
        .bearer_auth(auth_token())
        .json(&json!({ "task_name": "Ghost", "type": "Corrective", "stage": "New" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
