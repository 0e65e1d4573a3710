//! Waypoint table — именованные маршруты
//!
//! Формат JSON (ключ — имя локации, значение — упорядоченные точки):
//! ```json
//! { "hospital": [ { "x": 5.0, "y": 0.5, "z": 0.0 }, { "x": 8.0, "y": 0.5, "z": 3.0 } ] }
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

/// Ошибки загрузки таблицы
#[derive(Debug, Error)]
pub enum WaypointTableError {
    #[error("failed to read waypoint table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid waypoint table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("location '{location}' has a non-finite coordinate at index {index}")]
    NonFiniteCoordinate { location: String, index: usize },
}

/// Точка в JSON представлении
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct WaypointRecord {
    x: f32,
    y: f32,
    z: f32,
}

impl From<WaypointRecord> for Vec3 {
    fn from(record: WaypointRecord) -> Self {
        Vec3::new(record.x, record.y, record.z)
    }
}

impl From<Vec3> for WaypointRecord {
    fn from(point: Vec3) -> Self {
        Self {
            x: point.x,
            y: point.y,
            z: point.z,
        }
    }
}

/// Имя локации → упорядоченный список точек (static, read-only в runtime)
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct WaypointTable {
    locations: HashMap<String, Vec<Vec3>>,
}

impl WaypointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Встроенная таблица (hospital / library / convenience_store)
    pub fn sample() -> Self {
        let mut table = Self::new();
        table.insert(
            "hospital",
            vec![Vec3::new(5.0, 0.5, 0.0), Vec3::new(8.0, 0.5, 3.0)],
        );
        table.insert("library", vec![Vec3::new(2.0, 0.5, 2.0)]);
        table.insert(
            "convenience_store",
            vec![
                Vec3::new(-2.0, 0.5, -1.0),
                Vec3::new(-4.0, 0.5, -4.0),
                Vec3::new(-7.0, 0.5, -5.0),
                Vec3::new(-8.0, 0.5, -8.0),
            ],
        );
        table
    }

    pub fn insert(&mut self, name: impl Into<String>, points: Vec<Vec3>) {
        self.locations.insert(name.into(), points);
    }

    /// Упорядоченные точки локации, None если имени нет
    pub fn lookup(&self, name: &str) -> Option<&[Vec3]> {
        self.locations.get(name).map(Vec::as_slice)
    }

    /// Имена локаций в алфавитном порядке
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.locations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self, WaypointTableError> {
        let records: BTreeMap<String, Vec<WaypointRecord>> = serde_json::from_str(json)?;
        let mut table = Self::new();

        for (location, points) in records {
            let points: Vec<Vec3> = points.into_iter().map(Vec3::from).collect();
            if let Some(index) = points.iter().position(|p| !p.is_finite()) {
                return Err(WaypointTableError::NonFiniteCoordinate { location, index });
            }
            table.insert(location, points);
        }

        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, WaypointTableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, WaypointTableError> {
        let records: BTreeMap<&str, Vec<WaypointRecord>> = self
            .locations
            .iter()
            .map(|(name, points)| {
                (
                    name.as_str(),
                    points.iter().copied().map(WaypointRecord::from).collect(),
                )
            })
            .collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_unknown() {
        let table = WaypointTable::sample();
        assert_eq!(table.lookup("library"), Some(&[Vec3::new(2.0, 0.5, 2.0)][..]));
        assert!(table.lookup("airport").is_none());
    }

    #[test]
    fn test_names_sorted() {
        let table = WaypointTable::sample();
        assert_eq!(table.names(), vec!["convenience_store", "hospital", "library"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_from_json_preserves_order() {
        let json = r#"{
            "hospital": [ { "x": 5, "y": 0.5, "z": 0 }, { "x": 8, "y": 0.5, "z": 3 } ],
            "empty": []
        }"#;
        let table = WaypointTable::from_json_str(json).expect("valid table");

        assert_eq!(
            table.lookup("hospital").unwrap(),
            &[Vec3::new(5.0, 0.5, 0.0), Vec3::new(8.0, 0.5, 3.0)]
        );
        assert_eq!(table.lookup("empty").unwrap().len(), 0);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = WaypointTable::from_json_str(r#"{ "hospital": [ { "x": 1 } ] }"#).unwrap_err();
        assert!(matches!(err, WaypointTableError::Json(_)));
    }

    #[test]
    fn test_rejects_overflowing_coordinate() {
        // 1e300 не помещается в f32 → inf
        let err = WaypointTable::from_json_str(r#"{ "far": [ { "x": 1e300, "y": 0, "z": 0 } ] }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            WaypointTableError::NonFiniteCoordinate { ref location, index: 0 } if location == "far"
        ));
    }

    #[test]
    fn test_json_round_trip_of_sample() {
        let table = WaypointTable::sample();
        let json = table.to_json_string().unwrap();
        assert_eq!(WaypointTable::from_json_str(&json).unwrap(), table);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = WaypointTable::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, WaypointTableError::Io(_)));
    }
}
