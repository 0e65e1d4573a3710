//! CameraRig — камера, привязанная к LocomotionController
//!
//! Правила по режиму:
//! - FreeRoam: look-target = Position, камера сдвигается на смещение entity
//!   (дальше pose согласует внешний free-look контроллер через `set_position`)
//! - TurnAnimation: look-target прибит к замороженной позиции
//! - PathFollow: position = Position + offset, look-target = Position
//!   (жёсткая chase-камера, offset не пересчитывается до конца пути,
//!   включая tick, на котором путь завершился)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::locomotion::{CameraPose, LocomotionController, LocomotionMode};
use crate::player::Player;

/// Параметры rig
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRigConfig {
    /// FreeRoam: камера не опускается ниже этой высоты
    pub min_height: f32,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self { min_height: 2.0 }
    }
}

/// Pose камеры, следящей за player entity
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    position: Vec3,
    look_target: Vec3,
    pub config: CameraRigConfig,
}

impl CameraRig {
    pub fn new(position: Vec3, look_target: Vec3) -> Self {
        Self {
            position,
            look_target,
            config: CameraRigConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CameraRigConfig) -> Self {
        self.config = config;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_target(&self) -> Vec3 {
        self.look_target
    }

    /// camera position − look-target
    pub fn offset(&self) -> Vec3 {
        self.position - self.look_target
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            look_target: self.look_target,
        }
    }

    /// Внешний free-look контроллер (orbit) согласует свою позицию
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Teleport: переносим камеру вместе с target, offset сохраняется
    pub fn snap_to(&mut self, target: Vec3) {
        let offset = self.offset();
        self.look_target = target;
        self.position = target + offset;
    }

    /// Tick rig после tick LocomotionController (тот же кадр)
    pub fn follow(&mut self, controller: &LocomotionController) {
        let position = controller.position();

        match controller.mode() {
            LocomotionMode::FreeRoam => {
                // Путь закончился в этом tick: последний кадр chase-камеры
                if let Some(offset) = controller.finished_camera_offset() {
                    self.position = position + offset;
                    self.look_target = position;
                    return;
                }

                let displacement = controller.last_displacement();
                self.position.x += displacement.x;
                self.position.z += displacement.z;
                if self.position.y < self.config.min_height {
                    self.position.y = self.config.min_height;
                }
                self.look_target = position;
            }
            LocomotionMode::TurnAnimation { anchor, .. } => {
                self.look_target = *anchor;
            }
            LocomotionMode::PathFollow { camera_offset, .. } => {
                if let Some(offset) = camera_offset {
                    self.position = position + *offset;
                }
                self.look_target = position;
            }
        }
    }
}

/// Система: CameraRig следует за player после tick_locomotion
pub fn follow_player_with_camera(
    players: Query<&LocomotionController, With<Player>>,
    mut rigs: Query<&mut CameraRig>,
) {
    let Ok(controller) = players.single() else {
        return;
    };

    for mut rig in rigs.iter_mut() {
        rig.follow(controller);
    }
}
