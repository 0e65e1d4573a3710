//! Параметры locomotion (скорости, длительности)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::animation::DEFAULT_TURN_DURATION;
use crate::path::PathParameterization;

/// Параметры движения (resource, общий для player entity)
///
/// Единицы: метры, радианы, секунды. `travel_speed` — доля пути в секунду
/// (0.3 ⇒ любой путь проходится за ~3.33 сек).
#[derive(Resource, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct LocomotionConfig {
    /// FreeRoam: скорость движения вперёд/назад (m/s)
    pub move_speed: f32,
    /// FreeRoam: скорость поворота (rad/s)
    pub rotate_speed: f32,
    /// TurnAnimation: длительность поворота (секунды)
    pub turn_duration: f32,
    /// PathFollow: прирост progress в секунду
    pub travel_speed: f32,
    /// PathFollow: как progress отображается на кривую
    pub parameterization: PathParameterization,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rotate_speed: 2.0,
            turn_duration: DEFAULT_TURN_DURATION,
            travel_speed: 0.3,
            parameterization: PathParameterization::Segment,
        }
    }
}

impl LocomotionConfig {
    /// Загружает config из JSON (отсутствующие поля — значения по умолчанию)
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
