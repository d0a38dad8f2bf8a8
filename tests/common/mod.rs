// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{TimeZone, Utc};
use gear_rules::config::Config;
use gear_rules::models::{Activity, Equipment, Rule, RuleCondition};
use gear_rules::routes::create_router;
use gear_rules::AppState;
use std::sync::Arc;

/// A plain outdoor ride with no gear assigned.
#[allow(dead_code)]
pub fn make_activity(id: i64) -> Activity {
    Activity {
        id,
        strava_activity_id: 16_800_000_000 + id,
        name: format!("Ride {}", id),
        activity_type: "Ride".to_string(),
        sport_type: Some("Ride".to_string()),
        start_date: Utc.with_ymd_and_hms(2024, 6, 1, 7, 30, 0).unwrap(),
        distance: 42_000.0,
        moving_time: 5400,
        elapsed_time: 6000,
        total_elevation_gain: Some(640.0),
        average_speed: Some(7.8),
        max_speed: Some(16.2),
        gear_id: None,
        strava_gear_id: None,
        trainer: false,
        commute: false,
        manual: false,
        private: false,
        external_id: Some(format!("garmin_push_{}", id)),
        device_name: Some("Garmin Edge 530".to_string()),
    }
}

/// An indoor Zwift ride.
#[allow(dead_code)]
pub fn make_virtual_ride(id: i64) -> Activity {
    Activity {
        name: "Zwift - Volcano Circuit".to_string(),
        activity_type: "VirtualRide".to_string(),
        sport_type: Some("VirtualRide".to_string()),
        trainer: true,
        external_id: Some(format!("zwift-activity-{}.fit", id)),
        device_name: Some("Zwift".to_string()),
        ..make_activity(id)
    }
}

#[allow(dead_code)]
pub fn make_equipment(id: i64, name: &str) -> Equipment {
    Equipment {
        id,
        strava_gear_id: format!("b{}", 1000 + id),
        name: name.to_string(),
        equipment_type: "bike".to_string(),
        brand_name: None,
        model_name: None,
        distance: 0.0,
        is_primary: false,
        is_retired: false,
    }
}

#[allow(dead_code)]
pub fn make_rule(
    id: i64,
    priority: i32,
    target_gear_id: i64,
    conditions: Vec<RuleCondition>,
) -> Rule {
    Rule {
        id,
        name: format!("Rule {}", id),
        priority,
        target_gear_id,
        is_active: true,
        conditions,
    }
}

/// Create a test app with the default test config.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState { config });
    (create_router(state.clone()), state)
}
