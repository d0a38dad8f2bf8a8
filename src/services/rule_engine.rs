// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rule evaluation against activities.
//!
//! Evaluation never fails: a condition that cannot be evaluated (missing
//! field, bad regex, non-numeric literal for a numeric operator, unknown
//! operator) does not match. A stale or broken rule must not stop a batch.
//!
//! The equipment map is borrowed for the lifetime of the evaluator, so a
//! batch always sees one consistent snapshot of gear names.

use crate::models::{
    Activity, ComparableKind, EquipmentMap, FieldValue, Operator, Rule, RuleCondition,
};
use regex::{Regex, RegexBuilder};

/// Virtual field resolved through the equipment map via `gear_id`.
pub const CURRENT_GEAR_NAME: &str = "current_gear_name";

/// Decides whether one condition holds for one activity.
#[derive(Debug, Clone, Copy)]
pub struct ConditionEvaluator<'a> {
    equipment: &'a EquipmentMap,
}

/// Condition literal coerced for a particular subject kind and operator.
enum Literal {
    Text(String),
    Boolean(bool),
    Number(f64),
    Pattern(Regex),
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(equipment: &'a EquipmentMap) -> Self {
        Self { equipment }
    }

    /// Evaluate `condition` against `activity`.
    pub fn evaluate(&self, activity: &Activity, condition: &RuleCondition) -> bool {
        // Absent data never matches, not even for the negated operators
        let Some(subject) = self.resolve(activity, &condition.field) else {
            return false;
        };

        let Some(literal) = coerce_literal(subject.kind(), &condition.operator, &condition.value)
        else {
            return false;
        };

        compare(&condition.operator, &subject, &literal)
    }

    /// Resolve the subject value for a field, including virtual fields.
    fn resolve<'s>(&'s self, activity: &'s Activity, field: &str) -> Option<FieldValue<'s>> {
        if field == CURRENT_GEAR_NAME {
            let gear_id = activity.gear_id?;
            return self.equipment.name_of(gear_id).map(FieldValue::Text);
        }
        activity.field(field)
    }
}

/// Parse a literal once, according to what it will be compared with.
fn coerce_literal(kind: ComparableKind, operator: &Operator, raw: &str) -> Option<Literal> {
    match operator {
        Operator::Unrecognized(name) => {
            tracing::debug!(operator = %name, "Unrecognized rule operator");
            None
        }
        op if op.is_numeric() => raw.trim().parse().ok().map(Literal::Number),
        Operator::Regex => match RegexBuilder::new(raw).case_insensitive(true).build() {
            Ok(pattern) => Some(Literal::Pattern(pattern)),
            Err(e) => {
                tracing::debug!(pattern = raw, error = %e, "Invalid rule regex");
                None
            }
        },
        Operator::Equals | Operator::NotEquals if kind == ComparableKind::Boolean => {
            Some(Literal::Boolean(raw.to_lowercase() == "true"))
        }
        _ => Some(Literal::Text(raw.to_lowercase())),
    }
}

fn compare(operator: &Operator, subject: &FieldValue<'_>, literal: &Literal) -> bool {
    match literal {
        Literal::Boolean(expected) => {
            let FieldValue::Boolean(actual) = subject else {
                return false;
            };
            match operator {
                Operator::Equals => actual == expected,
                Operator::NotEquals => actual != expected,
                _ => false,
            }
        }
        Literal::Number(threshold) => {
            let Some(value) = subject.to_number() else {
                return false;
            };
            match operator {
                Operator::GreaterThan => value > *threshold,
                Operator::LessThan => value < *threshold,
                Operator::GreaterThanOrEqual => value >= *threshold,
                Operator::LessThanOrEqual => value <= *threshold,
                _ => false,
            }
        }
        Literal::Pattern(pattern) => pattern.is_match(&subject.to_text()),
        Literal::Text(needle) => {
            let text = subject.to_text().to_lowercase();
            match operator {
                Operator::Equals => text == *needle,
                Operator::NotEquals => text != *needle,
                Operator::Contains => text.contains(needle.as_str()),
                Operator::NotContains => !text.contains(needle.as_str()),
                Operator::StartsWith => text.starts_with(needle.as_str()),
                Operator::EndsWith => text.ends_with(needle.as_str()),
                _ => false,
            }
        }
    }
}

/// Combines a rule's conditions and picks the governing rule among many.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatcher<'a> {
    evaluator: ConditionEvaluator<'a>,
}

impl<'a> RuleMatcher<'a> {
    pub fn new(equipment: &'a EquipmentMap) -> Self {
        Self {
            evaluator: ConditionEvaluator::new(equipment),
        }
    }

    /// Check whether `rule` matches `activity`.
    ///
    /// Every condition is evaluated, then the results are folded left to
    /// right. The connector between condition i-1 and condition i is the
    /// `logic` of condition i-1; the last condition's `logic` is unused.
    pub fn matches(&self, activity: &Activity, rule: &Rule) -> bool {
        let results: Vec<_> = rule
            .conditions
            .iter()
            .map(|c| (self.evaluator.evaluate(activity, c), &c.logic))
            .collect();

        let Some(&(first, _)) = results.first() else {
            return false;
        };

        results
            .windows(2)
            .fold(first, |acc, pair| pair[0].1.combine(acc, pair[1].0))
    }

    /// Find the active rule with the lowest priority that matches.
    ///
    /// Rules with equal priority keep their input order.
    pub fn find_governing_rule<'r>(
        &self,
        activity: &Activity,
        rules: &'r [Rule],
    ) -> Option<&'r Rule> {
        let mut candidates: Vec<&Rule> = rules.iter().filter(|r| r.is_active).collect();
        candidates.sort_by_key(|r| r.priority);

        let governing = candidates
            .into_iter()
            .find(|rule| self.matches(activity, rule));

        tracing::trace!(
            activity_id = activity.id,
            rule_id = governing.map(|r| r.id),
            "Governing rule lookup"
        );
        governing
    }

    /// Filter `activities` to those `rule` matches, preserving order.
    pub fn find_all_matching<'b>(
        &self,
        activities: &'b [Activity],
        rule: &Rule,
    ) -> Vec<&'b Activity> {
        activities
            .iter()
            .filter(|activity| self.matches(activity, rule))
            .collect()
    }
}
