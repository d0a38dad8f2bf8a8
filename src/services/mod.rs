// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod planner;
pub mod rule_engine;

pub use planner::RulePlanner;
pub use rule_engine::{ConditionEvaluator, RuleMatcher, CURRENT_GEAR_NAME};
