// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gear assignment rules and their conditions.
//!
//! Operators and connectors are stored as free text by the rule editor.
//! They are parsed leniently here: an unknown operator is kept verbatim and
//! simply never matches, and an unknown connector is kept verbatim and acts
//! as `OR`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison applied by a single condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Regex,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    /// Operator text that is not recognized; never matches.
    Unrecognized(String),
}

impl Operator {
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "equals" => Operator::Equals,
            "not_equals" => Operator::NotEquals,
            "contains" => Operator::Contains,
            "not_contains" => Operator::NotContains,
            "starts_with" => Operator::StartsWith,
            "ends_with" => Operator::EndsWith,
            "regex" => Operator::Regex,
            "greater_than" => Operator::GreaterThan,
            "less_than" => Operator::LessThan,
            "greater_than_or_equal" => Operator::GreaterThanOrEqual,
            "less_than_or_equal" => Operator::LessThanOrEqual,
            _ => Operator::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::Regex => "regex",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::GreaterThanOrEqual => "greater_than_or_equal",
            Operator::LessThanOrEqual => "less_than_or_equal",
            Operator::Unrecognized(raw) => raw,
        }
    }

    /// True for the operators that compare parsed numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Operator::GreaterThan
                | Operator::LessThan
                | Operator::GreaterThanOrEqual
                | Operator::LessThanOrEqual
        )
    }
}

impl From<String> for Operator {
    fn from(raw: String) -> Self {
        Operator::parse(&raw)
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connector from a condition to the one after it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Logic {
    #[default]
    And,
    Or,
    /// Connector text that is not recognized; combines like `Or`.
    Unrecognized(String),
}

impl Logic {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("and") {
            Logic::And
        } else if raw.eq_ignore_ascii_case("or") {
            Logic::Or
        } else {
            Logic::Unrecognized(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
            Logic::Unrecognized(raw) => raw,
        }
    }

    pub fn combine(&self, left: bool, right: bool) -> bool {
        match self {
            Logic::And => left && right,
            Logic::Or | Logic::Unrecognized(_) => left || right,
        }
    }
}

impl From<String> for Logic {
    fn from(raw: String) -> Self {
        Logic::parse(&raw)
    }
}

impl From<Logic> for String {
    fn from(logic: Logic) -> Self {
        logic.as_str().to_string()
    }
}

/// One field/operator/value test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    /// Activity field name, or `current_gear_name`
    pub field: String,
    pub operator: Operator,
    /// Literal, always text
    pub value: String,
    /// How this condition connects to the next one
    #[serde(default)]
    pub logic: Logic,
}

impl RuleCondition {
    pub fn new(field: &str, operator: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            operator: Operator::parse(operator),
            value: value.to_string(),
            logic: Logic::And,
        }
    }

    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = logic;
        self
    }
}

fn default_active() -> bool {
    true
}

/// A prioritized rule assigning `target_gear_id` to matching activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// Lower values are evaluated first
    #[serde(default)]
    pub priority: i32,
    pub target_gear_id: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Evaluated in order; order changes the outcome
    #[serde(default)]
    pub conditions: Vec<RuleCondition>,
}
