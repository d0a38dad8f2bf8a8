// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Synced Strava activity model and field access for rule conditions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time_utils::format_condition_datetime;

/// Activity record as loaded by the sync layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Local activity ID
    pub id: i64,
    /// Strava activity ID
    pub strava_activity_id: i64,
    /// Activity name/title
    pub name: String,
    /// Activity type (Ride, Run, VirtualRide, etc.)
    pub activity_type: String,
    /// More specific sport type
    #[serde(default)]
    pub sport_type: Option<String>,
    /// Start date/time
    pub start_date: DateTime<Utc>,
    /// Distance in meters
    #[serde(default)]
    pub distance: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: i64,
    /// Elapsed time in seconds
    #[serde(default)]
    pub elapsed_time: i64,
    #[serde(default)]
    pub total_elevation_gain: Option<f64>,
    #[serde(default)]
    pub average_speed: Option<f64>,
    #[serde(default)]
    pub max_speed: Option<f64>,
    /// Local equipment ID currently assigned
    #[serde(default)]
    pub gear_id: Option<i64>,
    /// Original Strava gear ID
    #[serde(default)]
    pub strava_gear_id: Option<String>,
    #[serde(default)]
    pub trainer: bool,
    #[serde(default)]
    pub commute: bool,
    #[serde(default)]
    pub manual: bool,
    #[serde(default)]
    pub private: bool,
    /// Upload external ID (used to spot Zwift, TrainerRoad, etc.)
    #[serde(default)]
    pub external_id: Option<String>,
    /// Device name (e.g. "Garmin Edge 530")
    #[serde(default)]
    pub device_name: Option<String>,
}

/// How a field's value is compared against a condition literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparableKind {
    Text,
    Numeric,
    Boolean,
}

/// A resolved activity field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Owned(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl FieldValue<'_> {
    pub fn kind(&self) -> ComparableKind {
        match self {
            FieldValue::Text(_) | FieldValue::Owned(_) => ComparableKind::Text,
            FieldValue::Integer(_) | FieldValue::Float(_) => ComparableKind::Numeric,
            FieldValue::Boolean(_) => ComparableKind::Boolean,
        }
    }

    /// Text form used by the string and regex operators.
    ///
    /// Floats always keep a fractional part ("1000.0"), integers never do.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => (*s).to_string(),
            FieldValue::Owned(s) => s.clone(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Float(f) => float_text(*f),
            FieldValue::Boolean(b) => b.to_string(),
        }
    }

    /// Numeric form used by the ordering operators.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Owned(s) => s.trim().parse().ok(),
            FieldValue::Integer(n) => Some(*n as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }
}

/// Shortest round-trip text for a float, as stored rules expect it.
///
/// Magnitudes in `[1e-4, 1e16)` print positionally with at least one
/// fractional digit. Anything else uses an exponent with an explicit sign
/// and at least two digits (`1e+16`, `1.5e-05`).
fn float_text(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = f.abs();
    if magnitude == 0.0 || (1e-4..1e16).contains(&magnitude) {
        let text = f.to_string();
        return if text.contains('.') {
            text
        } else {
            format!("{}.0", text)
        };
    }

    let text = format!("{:e}", f);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

impl Activity {
    /// Names accepted by [`Activity::field`].
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "strava_activity_id",
        "name",
        "activity_type",
        "sport_type",
        "start_date",
        "distance",
        "moving_time",
        "elapsed_time",
        "total_elevation_gain",
        "average_speed",
        "max_speed",
        "gear_id",
        "strava_gear_id",
        "trainer",
        "commute",
        "manual",
        "private",
        "external_id",
        "device_name",
    ];

    /// Read a stored field by name.
    ///
    /// Returns `None` for unknown names and for optional fields without a value.
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "id" => FieldValue::Integer(self.id),
            "strava_activity_id" => FieldValue::Integer(self.strava_activity_id),
            "name" => FieldValue::Text(&self.name),
            "activity_type" => FieldValue::Text(&self.activity_type),
            "sport_type" => FieldValue::Text(self.sport_type.as_deref()?),
            "start_date" => FieldValue::Owned(format_condition_datetime(self.start_date)),
            "distance" => FieldValue::Float(self.distance),
            "moving_time" => FieldValue::Integer(self.moving_time),
            "elapsed_time" => FieldValue::Integer(self.elapsed_time),
            "total_elevation_gain" => FieldValue::Float(self.total_elevation_gain?),
            "average_speed" => FieldValue::Float(self.average_speed?),
            "max_speed" => FieldValue::Float(self.max_speed?),
            "gear_id" => FieldValue::Integer(self.gear_id?),
            "strava_gear_id" => FieldValue::Text(self.strava_gear_id.as_deref()?),
            "trainer" => FieldValue::Boolean(self.trainer),
            "commute" => FieldValue::Boolean(self.commute),
            "manual" => FieldValue::Boolean(self.manual),
            "private" => FieldValue::Boolean(self.private),
            "external_id" => FieldValue::Text(self.external_id.as_deref()?),
            "device_name" => FieldValue::Text(self.device_name.as_deref()?),
            _ => return None,
        };
        Some(value)
    }
}
