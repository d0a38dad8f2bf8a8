// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Equipment (gear) model and the id-to-name lookup used by rules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A bike or pair of shoes synced from the athlete's Strava profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    /// Local equipment ID
    pub id: i64,
    /// Strava gear ID (e.g. "b1234567")
    pub strava_gear_id: String,
    pub name: String,
    /// "bike" or "shoes"
    #[serde(default)]
    pub equipment_type: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    /// Total distance in meters
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_retired: bool,
}

/// Immutable snapshot of equipment names keyed by local equipment ID.
///
/// Built once per evaluation batch and borrowed by the rule engine.
#[derive(Debug, Clone, Default)]
pub struct EquipmentMap {
    names: HashMap<i64, String>,
}

impl EquipmentMap {
    pub fn from_equipment(equipment: &[Equipment]) -> Self {
        Self {
            names: equipment
                .iter()
                .map(|eq| (eq.id, eq.name.clone()))
                .collect(),
        }
    }

    /// Look up the name for an equipment ID.
    pub fn name_of(&self, id: i64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(i64, String)> for EquipmentMap {
    fn from_iter<T: IntoIterator<Item = (i64, String)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_from_equipment() {
        let equipment = vec![
            Equipment {
                id: 1,
                strava_gear_id: "b1".to_string(),
                name: "Trainer Bike".to_string(),
                equipment_type: "bike".to_string(),
                brand_name: None,
                model_name: None,
                distance: 0.0,
                is_primary: false,
                is_retired: false,
            },
            Equipment {
                id: 2,
                strava_gear_id: "g2".to_string(),
                name: "Trail Shoes".to_string(),
                equipment_type: "shoes".to_string(),
                brand_name: Some("Hoka".to_string()),
                model_name: None,
                distance: 120_000.0,
                is_primary: true,
                is_retired: false,
            },
        ];

        let map = EquipmentMap::from_equipment(&equipment);
        assert_eq!(map.len(), 2);
        assert_eq!(map.name_of(1), Some("Trainer Bike"));
        assert_eq!(map.name_of(2), Some("Trail Shoes"));
        assert_eq!(map.name_of(3), None);
    }

    #[test]
    fn test_equipment_defaults_from_json() {
        let eq: Equipment =
            serde_json::from_str(r#"{"id": 7, "strava_gear_id": "b7", "name": "Gravel"}"#)
                .expect("minimal equipment should parse");
        assert_eq!(eq.equipment_type, "");
        assert!(!eq.is_primary);
        assert!(EquipmentMap::default().is_empty());
    }
}
