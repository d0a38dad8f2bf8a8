// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read models produced by the rule planner.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Activities a rule would change, as shown before applying it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RulePreview {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub rule_id: i64,
    pub rule_name: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub target_gear_id: i64,
    pub target_gear_name: String,
    pub matching_activities: Vec<PreviewActivity>,
    pub total_count: usize,
}

/// One matching activity inside a [`RulePreview`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PreviewActivity {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub strava_activity_id: i64,
    pub name: String,
    pub activity_type: String,
    pub start_date: String,
    pub distance: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub moving_time: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub current_gear_id: Option<i64>,
    pub current_gear_name: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub new_gear_id: i64,
    pub new_gear_name: String,
}

/// A rule listed with its target gear and how many activities it matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RuleSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    pub name: String,
    pub priority: i32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub target_gear_id: i64,
    pub target_gear_name: Option<String>,
    pub is_active: bool,
    pub condition_count: usize,
    pub matching_count: usize,
}

/// A single gear change for one activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GearAssignment {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub activity_id: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub strava_activity_id: i64,
    pub activity_name: String,
    /// Rule that produced this change
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub rule_id: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub from_gear_id: Option<i64>,
    pub from_gear_name: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub to_gear_id: i64,
    pub to_gear_name: Option<String>,
    /// Strava gear ID to send upstream, when the target is known
    pub to_strava_gear_id: Option<String>,
}

/// Changes one rule would make when applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ApplyPlan {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub rule_id: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub target_gear_id: i64,
    pub target_gear_name: String,
    /// Number of matching activities (updates + skipped)
    pub total: usize,
    pub updates: Vec<GearAssignment>,
    /// Matching activities already on the target gear
    #[cfg_attr(feature = "binding-generation", ts(type = "Array<number>"))]
    pub skipped: Vec<i64>,
}

/// Changes implied by the governing rule of every activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AssignmentPlan {
    pub assignments: Vec<GearAssignment>,
    /// Activities whose governing rule already matches their gear
    pub unchanged: usize,
    /// Activities no active rule matches
    pub unmatched: usize,
}
