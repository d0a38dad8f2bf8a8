// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod equipment;
pub mod plan;
pub mod rule;

pub use activity::{Activity, ComparableKind, FieldValue};
pub use equipment::{Equipment, EquipmentMap};
pub use plan::{
    ApplyPlan, AssignmentPlan, GearAssignment, PreviewActivity, RulePreview, RuleSummary,
};
pub use rule::{Logic, Operator, Rule, RuleCondition};
