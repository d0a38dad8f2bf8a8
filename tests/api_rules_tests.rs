// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for the rule evaluation endpoints.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use gear_rules::config::Config;
use gear_rules::models::RuleCondition;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn trainer_rule(id: i64, priority: i32, target_gear_id: i64) -> Value {
    serde_json::to_value(common::make_rule(
        id,
        priority,
        target_gear_id,
        vec![RuleCondition::new("trainer", "equals", "true")],
    ))
    .unwrap()
}

fn equipment() -> Value {
    serde_json::to_value(vec![
        common::make_equipment(1, "Road Bike"),
        common::make_equipment(2, "Trainer Bike"),
    ])
    .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_preview_lists_matching_activities() {
    let (app, _state) = common::create_test_app();
    let mut indoor = common::make_virtual_ride(2);
    indoor.gear_id = Some(1);
    let activities = vec![common::make_activity(1), indoor];

    let (status, body) = post_json(
        app,
        "/api/rules/preview",
        json!({
            "rule": trainer_rule(5, 0, 2),
            "activities": activities,
            "equipment": equipment(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rule_id"], 5);
    assert_eq!(body["target_gear_name"], "Trainer Bike");
    assert_eq!(body["total_count"], 1);
    let first = &body["matching_activities"][0];
    assert_eq!(first["id"], 2);
    assert_eq!(first["current_gear_name"], "Road Bike");
    assert_eq!(first["new_gear_id"], 2);
    assert_eq!(first["start_date"], "2024-06-01T07:30:00Z");
}

#[tokio::test]
async fn test_apply_plan_unknown_target_is_not_found() {
    let (app, _state) = common::create_test_app();

    let (status, body) = post_json(
        app,
        "/api/rules/apply-plan",
        json!({
            "rule": trainer_rule(5, 0, 99),
            "activities": [common::make_virtual_ride(1)],
            "equipment": equipment(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["details"], "Target equipment not found");
}

#[tokio::test]
async fn test_apply_plan_with_activity_ids() {
    let (app, _state) = common::create_test_app();
    let mut on_target = common::make_virtual_ride(3);
    on_target.gear_id = Some(2);

    let (status, body) = post_json(
        app,
        "/api/rules/apply-plan",
        json!({
            "rule": trainer_rule(5, 0, 2),
            "activities": [
                common::make_virtual_ride(1),
                common::make_virtual_ride(2),
                on_target,
            ],
            "equipment": equipment(),
            "activity_ids": [2, 3],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["skipped"], json!([3]));
    assert_eq!(body["updates"][0]["activity_id"], 2);
    assert_eq!(body["updates"][0]["to_strava_gear_id"], "b1002");
}

#[tokio::test]
async fn test_apply_plan_empty_activity_ids_plans_all() {
    let (app, _state) = common::create_test_app();

    let (status, body) = post_json(
        app,
        "/api/rules/apply-plan",
        json!({
            "rule": trainer_rule(5, 0, 2),
            "activities": [common::make_virtual_ride(1), common::make_virtual_ride(2)],
            "equipment": equipment(),
            "activity_ids": [],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["updates"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_assignment_plan_counts() {
    let (app, _state) = common::create_test_app();
    let mut already = common::make_virtual_ride(2);
    already.gear_id = Some(2);
    let mut commute = common::make_activity(3);
    commute.commute = true;

    let commute_rule = serde_json::to_value(common::make_rule(
        6,
        1,
        1,
        vec![RuleCondition::new("commute", "equals", "true")],
    ))
    .unwrap();

    let (status, body) = post_json(
        app,
        "/api/rules/assignments",
        json!({
            "rules": [commute_rule, trainer_rule(5, 0, 2)],
            "activities": [
                common::make_virtual_ride(1),
                already,
                commute,
                common::make_activity(4),
            ],
            "equipment": equipment(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unchanged"], 1);
    assert_eq!(body["unmatched"], 1);
    let assignments = body["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[0]["activity_id"], 1);
    assert_eq!(assignments[0]["rule_id"], 5);
    assert_eq!(assignments[1]["activity_id"], 3);
    assert_eq!(assignments[1]["to_gear_name"], "Road Bike");
}

#[tokio::test]
async fn test_summary_reports_match_counts() {
    let (app, _state) = common::create_test_app();

    let (status, body) = post_json(
        app,
        "/api/rules/summary",
        json!({
            "rules": [trainer_rule(7, 3, 2), trainer_rule(8, 1, 99)],
            "activities": [common::make_virtual_ride(1), common::make_activity(2)],
            "equipment": equipment(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], 8);
    assert_eq!(body[0]["target_gear_name"], Value::Null);
    assert_eq!(body[1]["id"], 7);
    assert_eq!(body[1]["matching_count"], 1);
}

#[tokio::test]
async fn test_governing_rule_endpoint() {
    let (app, _state) = common::create_test_app();
    let type_rule = json!({
        "id": 2,
        "priority": 2,
        "target_gear_id": 1,
        "conditions": [
            {"field": "activity_type", "operator": "equals", "value": "VirtualRide"}
        ]
    });
    let mut inactive = trainer_rule(1, 1, 2);
    inactive["is_active"] = json!(false);

    let (status, body) = post_json(
        app.clone(),
        "/api/rules/governing",
        json!({
            "activity": common::make_virtual_ride(1),
            "rules": [trainer_rule(1, 1, 2), type_rule.clone()],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rule"]["id"], 1);

    let (status, body) = post_json(
        app.clone(),
        "/api/rules/governing",
        json!({
            "activity": common::make_virtual_ride(1),
            "rules": [inactive, type_rule],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rule"]["id"], 2);

    let (status, body) = post_json(
        app,
        "/api/rules/governing",
        json!({ "activity": common::make_activity(1), "rules": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rule"], Value::Null);
}

#[tokio::test]
async fn test_too_many_activities_rejected() {
    let (app, _state) = common::create_test_app_with(Config {
        max_activities_per_request: 2,
        ..Config::default()
    });

    let (status, body) = post_json(
        app,
        "/api/rules/preview",
        json!({
            "rule": trainer_rule(5, 0, 2),
            "activities": [
                common::make_activity(1),
                common::make_activity(2),
                common::make_activity(3),
            ],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}
