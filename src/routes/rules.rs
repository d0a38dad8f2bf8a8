// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rule evaluation routes.
//!
//! Every request carries the records it needs (rules, activities and the
//! athlete's equipment). Nothing is stored between requests, and each
//! request evaluates against its own equipment snapshot.
//!
//! Batch evaluation is CPU-bound, so it runs on the blocking thread pool.

use crate::error::{AppError, Result};
use crate::models::{
    Activity, ApplyPlan, AssignmentPlan, Equipment, EquipmentMap, Rule, RulePreview,
    RuleSummary,
};
use crate::services::{RuleMatcher, RulePlanner};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Rule routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/rules/preview", post(preview_rule))
        .route("/api/rules/summary", post(summarize_rules))
        .route("/api/rules/apply-plan", post(plan_apply))
        .route("/api/rules/assignments", post(plan_assignments))
        .route("/api/rules/governing", post(governing_rule))
}

/// Reject batches larger than the configured limit.
fn check_batch_size(state: &AppState, count: usize) -> Result<()> {
    let limit = state.config.max_activities_per_request;
    if count > limit {
        return Err(AppError::BadRequest(format!(
            "Too many activities: {} (limit {})",
            count, limit
        )));
    }
    Ok(())
}

/// Run a batch evaluation on the blocking thread pool.
async fn evaluate_batch<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Rule evaluation task failed: {}", e)))?
}

// ─── Single Rule ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RuleRequest {
    pub rule: Rule,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

/// Preview which activities a rule would move to its target gear.
async fn preview_rule(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RuleRequest>,
) -> Result<Json<RulePreview>> {
    check_batch_size(&state, req.activities.len())?;

    let rule_id = req.rule.id;
    let preview = evaluate_batch(move || {
        Ok(RulePlanner::new(&req.equipment).preview(&req.rule, &req.activities))
    })
    .await?;
    tracing::info!(
        rule_id,
        matches = preview.total_count,
        "Rule preview"
    );
    Ok(Json(preview))
}

#[derive(Deserialize)]
pub struct ApplyPlanRequest {
    pub rule: Rule,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    /// Restrict the plan to these activities
    #[serde(default)]
    pub activity_ids: Option<Vec<i64>>,
}

/// Plan the gear updates for applying one rule.
async fn plan_apply(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ApplyPlanRequest>,
) -> Result<Json<ApplyPlan>> {
    check_batch_size(&state, req.activities.len())?;

    let rule_id = req.rule.id;
    let plan = evaluate_batch(move || {
        RulePlanner::new(&req.equipment).apply_plan(
            &req.rule,
            &req.activities,
            req.activity_ids.as_deref(),
        )
    })
    .await?;
    tracing::info!(
        rule_id,
        updates = plan.updates.len(),
        skipped = plan.skipped.len(),
        "Rule apply plan"
    );
    Ok(Json(plan))
}

// ─── Rule Sets ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RulesRequest {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

/// List rules by priority with their match counts.
async fn summarize_rules(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RulesRequest>,
) -> Result<Json<Vec<RuleSummary>>> {
    check_batch_size(&state, req.activities.len())?;

    let summary = evaluate_batch(move || {
        Ok(RulePlanner::new(&req.equipment).summarize(&req.rules, &req.activities))
    })
    .await?;
    Ok(Json(summary))
}

/// Plan gear assignments from each activity's governing rule.
async fn plan_assignments(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RulesRequest>,
) -> Result<Json<AssignmentPlan>> {
    check_batch_size(&state, req.activities.len())?;

    let rule_count = req.rules.len();
    let plan = evaluate_batch(move || {
        Ok(RulePlanner::new(&req.equipment).assignment_plan(&req.activities, &req.rules))
    })
    .await?;
    tracing::info!(
        rules = rule_count,
        assignments = plan.assignments.len(),
        "Assignment plan"
    );
    Ok(Json(plan))
}

#[derive(Deserialize)]
pub struct GoverningRequest {
    pub activity: Activity,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

#[derive(Serialize)]
pub struct GoverningResponse {
    /// The governing rule, or null when no active rule matches
    pub rule: Option<Rule>,
}

/// Find the rule that governs a single activity.
async fn governing_rule(Json(req): Json<GoverningRequest>) -> Json<GoverningResponse> {
    let names = EquipmentMap::from_equipment(&req.equipment);
    let rule = RuleMatcher::new(&names)
        .find_governing_rule(&req.activity, &req.rules)
        .cloned();

    Json(GoverningResponse { rule })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_evaluate_batch_returns_result() {
        let value = evaluate_batch(|| Ok(7)).await.expect("batch should succeed");
        assert_eq!(value, 7);

        let err = evaluate_batch::<(), _>(|| Err(AppError::NotFound("gear".to_string())))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_evaluate_batch_panic_is_internal() {
        let err = evaluate_batch::<(), _>(|| panic!("evaluation blew up"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
