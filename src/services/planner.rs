// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rule planning service.
//!
//! Turns rule engine verdicts into the views the rule screens need:
//! 1. Preview which activities a rule would change
//! 2. Count matches for every rule
//! 3. Plan the gear updates for applying one rule
//! 4. Plan gear assignments from each activity's governing rule
//!
//! Nothing here talks to Strava; the plans are handed to the sync layer.

use crate::error::{AppError, Result};
use crate::models::{
    Activity, ApplyPlan, AssignmentPlan, Equipment, EquipmentMap, GearAssignment,
    PreviewActivity, Rule, RulePreview, RuleSummary,
};
use crate::services::rule_engine::RuleMatcher;
use crate::time_utils::format_utc_rfc3339;

/// Name shown for a target gear that is not in the athlete's equipment.
const UNKNOWN_GEAR_NAME: &str = "Unknown";

/// Builds rule previews and gear assignment plans for one athlete.
pub struct RulePlanner<'a> {
    equipment: &'a [Equipment],
    names: EquipmentMap,
}

impl<'a> RulePlanner<'a> {
    pub fn new(equipment: &'a [Equipment]) -> Self {
        Self {
            equipment,
            names: EquipmentMap::from_equipment(equipment),
        }
    }

    fn matcher(&self) -> RuleMatcher<'_> {
        RuleMatcher::new(&self.names)
    }

    fn find_equipment(&self, id: i64) -> Option<&'a Equipment> {
        self.equipment.iter().find(|eq| eq.id == id)
    }

    fn gear_name(&self, id: Option<i64>) -> Option<String> {
        id.and_then(|id| self.names.name_of(id)).map(str::to_string)
    }

    /// Preview the activities `rule` would move to its target gear.
    pub fn preview(&self, rule: &Rule, activities: &[Activity]) -> RulePreview {
        let target_name = self
            .names
            .name_of(rule.target_gear_id)
            .unwrap_or(UNKNOWN_GEAR_NAME)
            .to_string();

        let matching_activities: Vec<PreviewActivity> = self
            .matcher()
            .find_all_matching(activities, rule)
            .into_iter()
            .map(|activity| PreviewActivity {
                id: activity.id,
                strava_activity_id: activity.strava_activity_id,
                name: activity.name.clone(),
                activity_type: activity.activity_type.clone(),
                start_date: format_utc_rfc3339(activity.start_date),
                distance: activity.distance,
                moving_time: activity.moving_time,
                current_gear_id: activity.gear_id,
                current_gear_name: self.gear_name(activity.gear_id),
                new_gear_id: rule.target_gear_id,
                new_gear_name: target_name.clone(),
            })
            .collect();

        tracing::debug!(
            rule_id = rule.id,
            matches = matching_activities.len(),
            "Built rule preview"
        );

        RulePreview {
            rule_id: rule.id,
            rule_name: rule.name.clone(),
            target_gear_id: rule.target_gear_id,
            target_gear_name: target_name,
            total_count: matching_activities.len(),
            matching_activities,
        }
    }

    /// List every rule by priority with its match count.
    ///
    /// Counts include inactive rules so the editor can show what enabling
    /// them would do.
    pub fn summarize(&self, rules: &[Rule], activities: &[Activity]) -> Vec<RuleSummary> {
        let matcher = self.matcher();
        let mut ordered: Vec<&Rule> = rules.iter().collect();
        ordered.sort_by_key(|r| r.priority);

        ordered
            .into_iter()
            .map(|rule| RuleSummary {
                id: rule.id,
                name: rule.name.clone(),
                priority: rule.priority,
                target_gear_id: rule.target_gear_id,
                target_gear_name: self.gear_name(Some(rule.target_gear_id)),
                is_active: rule.is_active,
                condition_count: rule.conditions.len(),
                matching_count: matcher.find_all_matching(activities, rule).len(),
            })
            .collect()
    }

    /// Plan the updates for applying `rule`.
    ///
    /// When `activity_ids` is given and non-empty only those activities are
    /// considered; an empty list means all of them. Matching activities
    /// already on the target gear are skipped.
    pub fn apply_plan(
        &self,
        rule: &Rule,
        activities: &[Activity],
        activity_ids: Option<&[i64]>,
    ) -> Result<ApplyPlan> {
        let target = self
            .find_equipment(rule.target_gear_id)
            .ok_or_else(|| AppError::NotFound("Target equipment not found".to_string()))?;

        let selected = activity_ids.filter(|ids| !ids.is_empty());
        let matcher = self.matcher();
        let matching: Vec<&Activity> = activities
            .iter()
            .filter(|a| selected.map_or(true, |ids| ids.contains(&a.id)))
            .filter(|a| matcher.matches(a, rule))
            .collect();
        let total = matching.len();

        let (already_assigned, to_update): (Vec<&Activity>, Vec<&Activity>) = matching
            .into_iter()
            .partition(|a| a.gear_id == Some(target.id));

        let updates: Vec<GearAssignment> = to_update
            .into_iter()
            .map(|activity| self.assignment(activity, rule, target.id))
            .collect();

        tracing::debug!(
            rule_id = rule.id,
            total,
            updates = updates.len(),
            skipped = already_assigned.len(),
            "Built apply plan"
        );

        Ok(ApplyPlan {
            rule_id: rule.id,
            target_gear_id: target.id,
            target_gear_name: target.name.clone(),
            total,
            updates,
            skipped: already_assigned.iter().map(|a| a.id).collect(),
        })
    }

    /// Plan gear changes from the governing rule of every activity.
    pub fn assignment_plan(&self, activities: &[Activity], rules: &[Rule]) -> AssignmentPlan {
        let matcher = self.matcher();
        let mut plan = AssignmentPlan::default();

        for activity in activities {
            match matcher.find_governing_rule(activity, rules) {
                None => plan.unmatched += 1,
                Some(rule) if activity.gear_id == Some(rule.target_gear_id) => plan.unchanged += 1,
                Some(rule) => plan
                    .assignments
                    .push(self.assignment(activity, rule, rule.target_gear_id)),
            }
        }

        tracing::debug!(
            activities = activities.len(),
            assignments = plan.assignments.len(),
            unchanged = plan.unchanged,
            unmatched = plan.unmatched,
            "Built assignment plan"
        );

        plan
    }

    fn assignment(&self, activity: &Activity, rule: &Rule, to_gear_id: i64) -> GearAssignment {
        GearAssignment {
            activity_id: activity.id,
            strava_activity_id: activity.strava_activity_id,
            activity_name: activity.name.clone(),
            rule_id: rule.id,
            from_gear_id: activity.gear_id,
            from_gear_name: self.gear_name(activity.gear_id),
            to_gear_id,
            to_gear_name: self.gear_name(Some(to_gear_id)),
            to_strava_gear_id: self
                .find_equipment(to_gear_id)
                .map(|eq| eq.strava_gear_id.clone()),
        }
    }
}
